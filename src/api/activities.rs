//! Activity feed service.
//!
//! Activities are append-only: they are created as a side effect of task and
//! leave submissions and re-listed newest first, never updated.

use std::rc::Rc;

use chrono::Utc;

use crate::models::{Activity, ActivityDraft};

use super::store::{
    parse_records, retain_writable, to_field_map, FieldMap, ListQuery, RecordId, RecordStore,
    StoreError,
};

const COLLECTION: &str = "activities";

const FIELDS: &[&str] = &["action", "time", "status", "activity_type", "user"];

const WRITABLE_FIELDS: &[&str] = &["action", "time", "status", "activity_type", "user"];

#[derive(Clone)]
pub struct ActivityService {
    store: Rc<dyn RecordStore>,
}

impl ActivityService {
    pub fn new(store: Rc<dyn RecordStore>) -> Self {
        Self { store }
    }

    fn writable(fields: FieldMap) -> FieldMap {
        retain_writable(fields, WRITABLE_FIELDS)
    }

    /// List the feed newest first, with the actor relation embedded.
    pub async fn list(
        &self,
        filters: &[(&str, &str)],
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Activity>, StoreError> {
        let mut query = ListQuery::projecting(FIELDS)
            .page(page, page_size)
            .expand("user", "userDetails")
            .newest_first("time");
        for (field, value) in filters {
            query = query.contains(field, value);
        }
        let items = self.store.list(COLLECTION, query).await?;
        parse_records(items)
    }

    /// Append one feed entry, stamping the current instant when the draft
    /// carries no time.
    pub async fn create(&self, draft: &ActivityDraft) -> Result<Option<RecordId>, StoreError> {
        let mut draft = draft.clone();
        if draft.time.is_none() {
            draft.time = Some(Utc::now());
        }
        let fields = Self::writable(to_field_map(&draft)?);
        self.store.create(COLLECTION, fields).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{MockCall, MockRecordStore};
    use crate::models::ActivityStatus;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_list_orders_newest_first() {
        let store = Rc::new(MockRecordStore::new());
        let service = ActivityService::new(store.clone());

        block_on(service.list(&[], 1, 10)).unwrap();

        match &store.call_log()[0] {
            MockCall::List { collection, query } => {
                assert_eq!(collection, "activities");
                assert_eq!(query["orderBy"], json!([{"field": "time", "direction": "desc"}]));
                assert_eq!(query["expands"], json!([{"name": "user", "alias": "userDetails"}]));
            }
            other => panic!("Expected list call, got {other:?}"),
        }
    }

    #[test]
    fn test_create_stamps_time_when_missing() {
        let store = Rc::new(MockRecordStore::new());
        let service = ActivityService::new(store.clone());

        let draft = ActivityDraft {
            user: "Alex Morgan".to_string(),
            action: "requested vacation leave".to_string(),
            time: None,
            status: ActivityStatus::Pending,
            activity_type: "leave".to_string(),
        };
        block_on(service.create(&draft)).unwrap();

        match &store.call_log()[0] {
            MockCall::Create { fields, .. } => {
                assert!(fields.contains_key("time"), "time should be stamped");
                assert_eq!(fields["status"], json!("pending"));
            }
            other => panic!("Expected create call, got {other:?}"),
        }
    }
}
