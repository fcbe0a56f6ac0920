//! HTTP adapter for the remote record store.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::config::AppConfig;

use super::store::{FieldMap, ListQuery, RecordId, RecordStore, StoreError};

const PROJECT_HEADER: &str = "X-Project-Id";
const PUBLIC_KEY_HEADER: &str = "X-Public-Key";

impl From<gloo_net::Error> for StoreError {
    fn from(err: gloo_net::Error) -> Self {
        StoreError::Network(err.to_string())
    }
}

/// Wire response for list calls.
#[derive(Debug, Deserialize)]
struct ListResponse {
    success: bool,
    #[serde(default)]
    items: Vec<Value>,
    #[serde(default)]
    message: Option<String>,
}

/// Wire response for create/update/delete calls.
#[derive(Debug, Deserialize)]
struct MutationResponse {
    success: bool,
    #[serde(default)]
    ids: Vec<RecordId>,
    #[serde(default)]
    message: Option<String>,
}

/// Concrete [`RecordStore`] adapter speaking JSON over HTTP.
#[derive(Clone)]
pub struct HttpRecordStore {
    base_url: String,
    project_id: String,
    public_key: String,
}

impl HttpRecordStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_url.clone(),
            project_id: config.project_id.clone(),
            public_key: config.public_key.clone(),
        }
    }

    fn collection_url(&self, collection: &str, suffix: &str) -> String {
        format!("{}/api/v1/records/{}{}", self.base_url, collection, suffix)
    }

    /// Attach the backend identifiers and send cookies along.
    fn request(&self, builder: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
        builder
            .credentials(web_sys::RequestCredentials::Include)
            .header(PROJECT_HEADER, &self.project_id)
            .header(PUBLIC_KEY_HEADER, &self.public_key)
    }

    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T, StoreError> {
        let status = response.status();

        if status == 401 {
            return Err(StoreError::Unauthorized);
        }

        if !response.ok() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(StoreError::Http { status, message });
        }

        response
            .json()
            .await
            .map_err(|err| StoreError::Deserialization(err.to_string()))
    }
}

fn rejection(message: Option<String>) -> StoreError {
    StoreError::Rejected(message.unwrap_or_else(|| "no reason given".to_string()))
}

#[async_trait(?Send)]
impl RecordStore for HttpRecordStore {
    async fn list(&self, collection: &str, query: ListQuery) -> Result<Vec<Value>, StoreError> {
        let request = self
            .request(Request::post(&self.collection_url(collection, "/query")))
            .json(&query)?;
        let response: ListResponse = self.handle_response(request.send().await?).await?;

        if !response.success {
            return Err(rejection(response.message));
        }
        Ok(response.items)
    }

    async fn create(
        &self,
        collection: &str,
        fields: FieldMap,
    ) -> Result<Option<RecordId>, StoreError> {
        let body = serde_json::json!({ "records": [fields] });
        let request = self
            .request(Request::post(&self.collection_url(collection, "")))
            .json(&body)?;
        let response: MutationResponse = self.handle_response(request.send().await?).await?;

        if !response.success {
            return Err(rejection(response.message));
        }
        Ok(response.ids.into_iter().next())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: FieldMap,
    ) -> Result<(), StoreError> {
        let request = self
            .request(Request::patch(&self.collection_url(collection, &format!("/{id}"))))
            .json(&serde_json::json!({ "fields": fields }))?;
        let response: MutationResponse = self.handle_response(request.send().await?).await?;

        if !response.success {
            return Err(rejection(response.message));
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, ids: &[RecordId]) -> Result<(), StoreError> {
        let request = self
            .request(Request::post(&self.collection_url(collection, "/delete")))
            .json(&serde_json::json!({ "ids": ids }))?;
        let response: MutationResponse = self.handle_response(request.send().await?).await?;

        if !response.success {
            return Err(rejection(response.message));
        }
        Ok(())
    }
}
