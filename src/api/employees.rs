//! Employee collection service.

use std::rc::Rc;

use crate::models::{Employee, EmployeeDraft};

use super::store::{
    parse_records, retain_writable, to_field_map, FieldMap, ListQuery, RecordId, RecordStore,
    StoreError,
};

const COLLECTION: &str = "employees";

const FIELDS: &[&str] = &[
    "name",
    "email",
    "phone",
    "department",
    "position",
    "join_date",
    "status",
];

/// Fields a client may set via create/update.
const WRITABLE_FIELDS: &[&str] = &[
    "name",
    "email",
    "phone",
    "department",
    "position",
    "join_date",
    "status",
];

#[derive(Clone)]
pub struct EmployeeService {
    store: Rc<dyn RecordStore>,
}

impl EmployeeService {
    pub fn new(store: Rc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Keep only allow-listed fields of a mutation payload.
    fn writable(fields: FieldMap) -> FieldMap {
        retain_writable(fields, WRITABLE_FIELDS)
    }

    /// List employees, optionally filtered by per-field substrings.
    pub async fn list(
        &self,
        filters: &[(&str, &str)],
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Employee>, StoreError> {
        let mut query = ListQuery::projecting(FIELDS).page(page, page_size);
        for (field, value) in filters {
            query = query.contains(field, value);
        }
        let items = self.store.list(COLLECTION, query).await?;
        parse_records(items)
    }

    pub async fn create(&self, draft: &EmployeeDraft) -> Result<Option<RecordId>, StoreError> {
        let fields = Self::writable(to_field_map(draft)?);
        self.store.create(COLLECTION, fields).await
    }

    pub async fn update(&self, id: &str, draft: &EmployeeDraft) -> Result<(), StoreError> {
        let fields = Self::writable(to_field_map(draft)?);
        self.store.update(COLLECTION, id, fields).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.store.delete(COLLECTION, &[id.to_string()]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{MockCall, MockRecordStore};
    use crate::models::EmployeeStatus;
    use chrono::NaiveDate;
    use futures::executor::block_on;
    use serde_json::json;

    fn draft() -> EmployeeDraft {
        EmployeeDraft {
            name: "Alex Morgan".to_string(),
            email: "alex.morgan@staffsphere.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            department: "Human Resources".to_string(),
            position: "HR Manager".to_string(),
            join_date: NaiveDate::from_ymd_opt(2020, 3, 15).unwrap(),
            status: EmployeeStatus::Active,
        }
    }

    #[test]
    fn test_writable_drops_fields_outside_allow_list() {
        let mut fields = to_field_map(&draft()).unwrap();
        fields.insert("salary".to_string(), json!(90000));
        fields.insert("id".to_string(), json!("emp-1"));

        let filtered = EmployeeService::writable(fields);

        assert!(!filtered.contains_key("salary"));
        assert!(!filtered.contains_key("id"));
        assert_eq!(filtered.len(), WRITABLE_FIELDS.len());
    }

    #[test]
    fn test_create_sends_only_writable_fields() {
        let store = Rc::new(MockRecordStore::new());
        let service = EmployeeService::new(store.clone());

        let created = block_on(service.create(&draft())).unwrap();
        assert_eq!(created.as_deref(), Some("employees-created"));

        let calls = store.call_log();
        assert_eq!(calls.len(), 1);
        match &calls[0] {
            MockCall::Create { collection, fields } => {
                assert_eq!(collection, "employees");
                let mut keys: Vec<_> = fields.keys().map(String::as_str).collect();
                keys.sort_unstable();
                let mut expected = WRITABLE_FIELDS.to_vec();
                expected.sort_unstable();
                assert_eq!(keys, expected);
            }
            other => panic!("Expected create call, got {other:?}"),
        }
    }

    #[test]
    fn test_list_builds_contains_filters_and_paging() {
        let store = Rc::new(MockRecordStore::new());
        let service = EmployeeService::new(store.clone());

        block_on(service.list(&[("department", "Engineering")], 2, 20)).unwrap();

        match &store.call_log()[0] {
            MockCall::List { collection, query } => {
                assert_eq!(collection, "employees");
                assert_eq!(query["pagingInfo"], json!({"limit": 20, "offset": 20}));
                assert_eq!(
                    query["where"],
                    json!([{
                        "fieldName": "department",
                        "operator": "Contains",
                        "values": ["Engineering"]
                    }])
                );
            }
            other => panic!("Expected list call, got {other:?}"),
        }
    }

    #[test]
    fn test_delete_sends_id_list() {
        let store = Rc::new(MockRecordStore::new());
        let service = EmployeeService::new(store.clone());

        block_on(service.delete("emp-3")).unwrap();

        match &store.call_log()[0] {
            MockCall::Delete { collection, ids } => {
                assert_eq!(collection, "employees");
                assert_eq!(ids, &["emp-3".to_string()]);
            }
            other => panic!("Expected delete call, got {other:?}"),
        }
    }

    #[test]
    fn test_failures_surface_as_rejected_outcomes() {
        let store = Rc::new(MockRecordStore::new());
        store.fail_next.set(true);
        let service = EmployeeService::new(store);

        let result = block_on(service.create(&draft()));
        assert!(matches!(result, Err(StoreError::Rejected(_))));
    }
}
