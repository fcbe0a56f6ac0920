//! Record-store interface and query envelope.
//!
//! The dashboard talks to one remote record store. Views never touch the
//! wire directly: typed entity services build [`ListQuery`] values and field
//! maps, and hand them to whatever [`RecordStore`] implementation was
//! injected at startup.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub type RecordId = String;

/// Raw field name/value pairs sent to or received from the store.
pub type FieldMap = serde_json::Map<String, Value>;

/// Store/transport error taxonomy.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    #[error("Unauthorized - please log in")]
    Unauthorized,
    #[error("Request rejected by the record store: {0}")]
    Rejected(String),
}

/// Substring or exact-match comparison for a where-clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WhereOperator {
    Contains,
    ExactMatch,
}

/// Filter on one field of a collection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhereClause {
    pub field_name: String,
    pub operator: WhereOperator,
    pub values: Vec<String>,
}

/// Limit/offset window over a list result.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Paging {
    pub limit: u32,
    pub offset: u32,
}

/// Relation expansion: embed the named related record under an alias.
#[derive(Debug, Clone, Serialize)]
pub struct Expand {
    pub name: String,
    pub alias: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Result ordering by a designated field.
#[derive(Debug, Clone, Serialize)]
pub struct SortOrder {
    pub field: String,
    pub direction: SortDirection,
}

/// Query envelope accepted by [`RecordStore::list`]: field projection,
/// pagination, substring/exact where-clauses, relation expansion and sort
/// order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paging_info: Option<Paging>,
    #[serde(rename = "where", skip_serializing_if = "Vec::is_empty")]
    pub where_clauses: Vec<WhereClause>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expands: Vec<Expand>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<SortOrder>,
}

impl ListQuery {
    /// Query projecting the given fields.
    pub fn projecting(fields: &[&str]) -> Self {
        Self {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Window the result to one page. `page` is 1-based.
    pub fn page(mut self, page: u32, page_size: u32) -> Self {
        let offset = page.saturating_sub(1) * page_size;
        self.paging_info = Some(Paging {
            limit: page_size,
            offset,
        });
        self
    }

    /// Add a substring filter on one field.
    pub fn contains(mut self, field: &str, value: &str) -> Self {
        self.where_clauses.push(WhereClause {
            field_name: field.to_string(),
            operator: WhereOperator::Contains,
            values: vec![value.to_string()],
        });
        self
    }

    /// Add an exact-match filter on one field.
    pub fn matching(mut self, field: &str, value: &str) -> Self {
        self.where_clauses.push(WhereClause {
            field_name: field.to_string(),
            operator: WhereOperator::ExactMatch,
            values: vec![value.to_string()],
        });
        self
    }

    /// Embed the related record behind `field` under `alias`.
    pub fn expand(mut self, field: &str, alias: &str) -> Self {
        self.expands.push(Expand {
            name: field.to_string(),
            alias: alias.to_string(),
        });
        self
    }

    /// Order the result by `field`, newest/largest first.
    pub fn newest_first(mut self, field: &str) -> Self {
        self.order_by.push(SortOrder {
            field: field.to_string(),
            direction: SortDirection::Desc,
        });
        self
    }
}

/// Interface every backend adapter implements; injected at startup and
/// shared behind `Rc<dyn RecordStore>`.
#[async_trait(?Send)]
pub trait RecordStore {
    /// List records of a collection as raw field maps.
    async fn list(&self, collection: &str, query: ListQuery) -> Result<Vec<Value>, StoreError>;

    /// Create one record; returns the created id when the store reports one.
    async fn create(
        &self,
        collection: &str,
        fields: FieldMap,
    ) -> Result<Option<RecordId>, StoreError>;

    /// Update one record by id.
    async fn update(&self, collection: &str, id: &str, fields: FieldMap)
        -> Result<(), StoreError>;

    /// Delete records by id list.
    async fn delete(&self, collection: &str, ids: &[RecordId]) -> Result<(), StoreError>;
}

/// Serialize a draft into a raw field map.
pub fn to_field_map<T: Serialize>(value: &T) -> Result<FieldMap, StoreError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(StoreError::Deserialization(
            "expected a JSON object payload".to_string(),
        )),
        Err(err) => Err(StoreError::Deserialization(err.to_string())),
    }
}

/// Drop every field not in the entity's writable-field allow-list.
pub fn retain_writable(mut fields: FieldMap, allowed: &[&str]) -> FieldMap {
    fields.retain(|key, _| allowed.contains(&key.as_str()));
    fields
}

/// Decode raw list items into a typed collection.
pub fn parse_records<T: DeserializeOwned>(items: Vec<Value>) -> Result<Vec<T>, StoreError> {
    items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item).map_err(|err| StoreError::Deserialization(err.to_string()))
        })
        .collect()
}
