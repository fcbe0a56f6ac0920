//! Task collection service.

use std::rc::Rc;

use crate::models::{Task, TaskDraft};

use super::store::{
    parse_records, retain_writable, to_field_map, FieldMap, ListQuery, RecordId, RecordStore,
    StoreError,
};

const COLLECTION: &str = "tasks";

const FIELDS: &[&str] = &[
    "description",
    "priority",
    "due_date",
    "status",
    "assigned_to",
];

const WRITABLE_FIELDS: &[&str] = &[
    "description",
    "priority",
    "due_date",
    "status",
    "assigned_to",
];

#[derive(Clone)]
pub struct TaskService {
    store: Rc<dyn RecordStore>,
}

impl TaskService {
    pub fn new(store: Rc<dyn RecordStore>) -> Self {
        Self { store }
    }

    fn writable(fields: FieldMap) -> FieldMap {
        retain_writable(fields, WRITABLE_FIELDS)
    }

    /// List tasks with the assignee relation embedded.
    pub async fn list(
        &self,
        filters: &[(&str, &str)],
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Task>, StoreError> {
        let mut query = ListQuery::projecting(FIELDS)
            .page(page, page_size)
            .expand("assigned_to", "assignee");
        for (field, value) in filters {
            query = query.contains(field, value);
        }
        let items = self.store.list(COLLECTION, query).await?;
        parse_records(items)
    }

    /// Tasks assigned to one employee.
    pub async fn list_for_employee(&self, employee_id: &str) -> Result<Vec<Task>, StoreError> {
        let query = ListQuery::projecting(FIELDS).matching("assigned_to", employee_id);
        let items = self.store.list(COLLECTION, query).await?;
        parse_records(items)
    }

    pub async fn create(&self, draft: &TaskDraft) -> Result<Option<RecordId>, StoreError> {
        let fields = Self::writable(to_field_map(draft)?);
        self.store.create(COLLECTION, fields).await
    }

    pub async fn update(&self, id: &str, draft: &TaskDraft) -> Result<(), StoreError> {
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
    use crate::models::TaskPriority;
    use chrono::NaiveDate;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_create_keeps_writable_fields_only() {
        let store = Rc::new(MockRecordStore::new());
        let service = TaskService::new(store.clone());

        let draft = TaskDraft {
            description: "Prepare onboarding docs".to_string(),
            priority: TaskPriority::High,
            due_date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            status: "pending".to_string(),
            assigned_to: "emp-2".to_string(),
        };
        block_on(service.create(&draft)).unwrap();

        match &store.call_log()[0] {
            MockCall::Create { collection, fields } => {
                assert_eq!(collection, "tasks");
                assert_eq!(fields["priority"], json!("high"));
                assert_eq!(fields["due_date"], json!("2024-06-10"));
                assert_eq!(fields.len(), WRITABLE_FIELDS.len());
            }
            other => panic!("Expected create call, got {other:?}"),
        }
    }

    #[test]
    fn test_list_for_employee_uses_exact_match() {
        let store = Rc::new(MockRecordStore::new());
        let service = TaskService::new(store.clone());

        block_on(service.list_for_employee("emp-2")).unwrap();

        match &store.call_log()[0] {
            MockCall::List { query, .. } => {
                assert_eq!(
                    query["where"],
                    json!([{
                        "fieldName": "assigned_to",
                        "operator": "ExactMatch",
                        "values": ["emp-2"]
                    }])
                );
            }
            other => panic!("Expected list call, got {other:?}"),
        }
    }

    #[test]
    fn test_list_expands_assignee() {
        let store = Rc::new(MockRecordStore::new());
        let service = TaskService::new(store.clone());

        block_on(service.list(&[], 1, 20)).unwrap();

        match &store.call_log()[0] {
            MockCall::List { query, .. } => {
                assert_eq!(
                    query["expands"],
                    json!([{"name": "assigned_to", "alias": "assignee"}])
                );
            }
            other => panic!("Expected list call, got {other:?}"),
        }
    }
}
