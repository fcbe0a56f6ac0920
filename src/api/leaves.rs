//! Leave-request collection service.

use std::rc::Rc;

use crate::models::{LeaveRequest, LeaveRequestDraft};

use super::store::{
    parse_records, retain_writable, to_field_map, FieldMap, ListQuery, RecordId, RecordStore,
    StoreError,
};

const COLLECTION: &str = "leave_requests";

const FIELDS: &[&str] = &[
    "leave_type",
    "start_date",
    "end_date",
    "reason",
    "status",
    "employee",
];

const WRITABLE_FIELDS: &[&str] = &[
    "leave_type",
    "start_date",
    "end_date",
    "reason",
    "status",
    "employee",
];

#[derive(Clone)]
pub struct LeaveRequestService {
    store: Rc<dyn RecordStore>,
}

impl LeaveRequestService {
    pub fn new(store: Rc<dyn RecordStore>) -> Self {
        Self { store }
    }

    fn writable(fields: FieldMap) -> FieldMap {
        retain_writable(fields, WRITABLE_FIELDS)
    }

    /// List leave requests with the employee relation embedded.
    pub async fn list(
        &self,
        filters: &[(&str, &str)],
        page: u32,
        page_size: u32,
    ) -> Result<Vec<LeaveRequest>, StoreError> {
        let mut query = ListQuery::projecting(FIELDS)
            .page(page, page_size)
            .expand("employee", "employeeDetails");
        for (field, value) in filters {
            query = query.contains(field, value);
        }
        let items = self.store.list(COLLECTION, query).await?;
        parse_records(items)
    }

    /// Requests filed by one employee.
    pub async fn list_for_employee(
        &self,
        employee_id: &str,
    ) -> Result<Vec<LeaveRequest>, StoreError> {
        let query = ListQuery::projecting(FIELDS).matching("employee", employee_id);
        let items = self.store.list(COLLECTION, query).await?;
        parse_records(items)
    }

    pub async fn create(&self, draft: &LeaveRequestDraft) -> Result<Option<RecordId>, StoreError> {
        let fields = Self::writable(to_field_map(draft)?);
        self.store.create(COLLECTION, fields).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{MockCall, MockRecordStore};
    use crate::models::LeaveType;
    use chrono::NaiveDate;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_create_serializes_dates_and_type() {
        let store = Rc::new(MockRecordStore::new());
        let service = LeaveRequestService::new(store.clone());

        let draft = LeaveRequestDraft {
            leave_type: LeaveType::Sick,
            start_date: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            reason: "Flu".to_string(),
            status: "pending".to_string(),
            employee: "emp-4".to_string(),
        };
        block_on(service.create(&draft)).unwrap();

        match &store.call_log()[0] {
            MockCall::Create { collection, fields } => {
                assert_eq!(collection, "leave_requests");
                assert_eq!(fields["leave_type"], json!("sick"));
                assert_eq!(fields["start_date"], json!("2024-06-05"));
                assert_eq!(fields["end_date"], json!("2024-06-10"));
            }
            other => panic!("Expected create call, got {other:?}"),
        }
    }

    #[test]
    fn test_list_for_employee_uses_exact_match() {
        let store = Rc::new(MockRecordStore::new());
        let service = LeaveRequestService::new(store.clone());

        block_on(service.list_for_employee("emp-4")).unwrap();

        match &store.call_log()[0] {
            MockCall::List { query, .. } => {
                assert_eq!(
                    query["where"],
                    json!([{
                        "fieldName": "employee",
                        "operator": "ExactMatch",
                        "values": ["emp-4"]
                    }])
                );
            }
            other => panic!("Expected list call, got {other:?}"),
        }
    }
}
