//! Department statistics service (read-only collection).

use std::rc::Rc;

use crate::models::DepartmentStat;

use super::store::{parse_records, ListQuery, RecordStore, StoreError};

const COLLECTION: &str = "department_stats";

const FIELDS: &[&str] = &["title", "value", "icon", "color", "increase"];

#[derive(Clone)]
pub struct DepartmentStatsService {
    store: Rc<dyn RecordStore>,
}

impl DepartmentStatsService {
    pub fn new(store: Rc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<DepartmentStat>, StoreError> {
        let items = self
            .store
            .list(COLLECTION, ListQuery::projecting(FIELDS))
            .await?;
        parse_records(items)
    }

    /// Look one statistic up by its title.
    pub async fn by_title(&self, title: &str) -> Result<Option<DepartmentStat>, StoreError> {
        let query = ListQuery::projecting(FIELDS).matching("title", title);
        let items = self.store.list(COLLECTION, query).await?;
        let mut stats: Vec<DepartmentStat> = parse_records(items)?;
        Ok(if stats.is_empty() {
            None
        } else {
            Some(stats.remove(0))
        })
    }
}
