//! In-memory [`RecordStore`] double recording every call it receives.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use serde_json::Value;

use super::store::{FieldMap, ListQuery, RecordId, RecordStore, StoreError};

#[derive(Debug, Clone)]
pub enum MockCall {
    List {
        collection: String,
        query: Value,
    },
    Create {
        collection: String,
        fields: FieldMap,
    },
    Update {
        collection: String,
        id: String,
        fields: FieldMap,
    },
    Delete {
        collection: String,
        ids: Vec<RecordId>,
    },
}

#[derive(Default)]
pub struct MockRecordStore {
    pub calls: RefCell<Vec<MockCall>>,
    /// Items handed back by every `list` call.
    pub list_items: RefCell<Vec<Value>>,
    /// When set, the next call fails with a rejected outcome.
    pub fail_next: Cell<bool>,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        if self.fail_next.replace(false) {
            return Err(StoreError::Rejected("mock failure".to_string()));
        }
        Ok(())
    }

    pub fn call_log(&self) -> Vec<MockCall> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl RecordStore for MockRecordStore {
    async fn list(&self, collection: &str, query: ListQuery) -> Result<Vec<Value>, StoreError> {
        self.calls.borrow_mut().push(MockCall::List {
            collection: collection.to_string(),
            query: serde_json::to_value(&query)
                .map_err(|err| StoreError::Deserialization(err.to_string()))?,
        });
        self.check_failure()?;
        Ok(self.list_items.borrow().clone())
    }

    async fn create(
        &self,
        collection: &str,
        fields: FieldMap,
    ) -> Result<Option<RecordId>, StoreError> {
        self.calls.borrow_mut().push(MockCall::Create {
            collection: collection.to_string(),
            fields,
        });
        self.check_failure()?;
        Ok(Some(format!("{collection}-created")))
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: FieldMap,
    ) -> Result<(), StoreError> {
        self.calls.borrow_mut().push(MockCall::Update {
            collection: collection.to_string(),
            id: id.to_string(),
            fields,
        });
        self.check_failure()
    }

    async fn delete(&self, collection: &str, ids: &[RecordId]) -> Result<(), StoreError> {
        self.calls.borrow_mut().push(MockCall::Delete {
            collection: collection.to_string(),
            ids: ids.to_vec(),
        });
        self.check_failure()
    }
}
