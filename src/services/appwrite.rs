use crate::models::{NewRecord, Record};
use crate::services::store::{RecordStore, StoreError};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;

/// Documents requested per list call
const PAGE_SIZE: usize = 100;

/// Appwrite-backed record store
///
/// Talks to the Appwrite database REST API:
/// - Listing the inventory collection page by page
/// - Creating, updating and deleting part documents
pub struct AppwriteStore {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    collection: String,
    client: Client,
}

impl AppwriteStore {
    /// Create a new Appwrite store client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collection: String,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            collection,
            client,
        })
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collection
        )
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/{}", self.documents_url(), urlencoding::encode(id))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
    }
}

/// Turn a non-success response into the matching [`StoreError`]
async fn check_status(response: Response, context: &str) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(StoreError::Unauthorized),
        StatusCode::NOT_FOUND => Err(StoreError::NotFound(context.to_string())),
        _ => {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("{} failed: {} - {}", context, status, body);
            Err(StoreError::ApiError(format!("{}: {}", context, status)))
        }
    }
}

fn decode_record(doc: &Value) -> Result<Record, StoreError> {
    let data = doc.get("data").unwrap_or(doc);

    serde_json::from_value(data.clone())
        .map_err(|e| StoreError::InvalidResponse(format!("Failed to parse record: {}", e)))
}

impl RecordStore for AppwriteStore {
    async fn list_records(&self) -> Result<Vec<Record>, StoreError> {
        let url = self.documents_url();
        let mut records = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut queries = vec![format!("limit({})", PAGE_SIZE)];
            if let Some(last_id) = &cursor {
                queries.push(format!("cursorAfter(\"{}\")", last_id));
            }
            let params: Vec<(&str, &str)> =
                queries.iter().map(|q| ("queries[]", q.as_str())).collect();

            let response = self
                .authorized(self.client.get(&url).query(&params))
                .send()
                .await?;
            let response = check_status(response, "Failed to list records").await?;

            let json: Value = response.json().await?;

            let documents = json
                .get("documents")
                .and_then(|d| d.as_array())
                .ok_or_else(|| StoreError::InvalidResponse("Missing documents array".into()))?;

            for doc in documents {
                match decode_record(doc) {
                    Ok(record) => records.push(record),
                    Err(e) => tracing::warn!("Skipping undecodable document: {}", e),
                }
            }

            cursor = documents
                .last()
                .and_then(|doc| doc.get("$id"))
                .and_then(|id| id.as_str())
                .map(str::to_string);

            if documents.len() < PAGE_SIZE || cursor.is_none() {
                break;
            }
        }

        tracing::debug!("Listed {} records from {}", records.len(), self.collection);

        Ok(records)
    }

    async fn create_record(&self, record: NewRecord) -> Result<Record, StoreError> {
        let document_id = uuid::Uuid::new_v4().simple().to_string();
        let payload = json!({
            "documentId": document_id,
            "data": record,
        });

        let response = self
            .authorized(self.client.post(self.documents_url()))
            .json(&payload)
            .send()
            .await?;
        let response = check_status(response, "Failed to create record").await?;

        let json: Value = response.json().await?;
        let created = decode_record(&json)?;

        tracing::debug!("Created record {} ({})", created.id, created.name);

        Ok(created)
    }

    async fn update_quantity(&self, id: &str, quantity: u32) -> Result<Record, StoreError> {
        let response = self
            .authorized(self.client.patch(self.document_url(id)))
            .json(&json!({ "data": { "quantity": quantity } }))
            .send()
            .await?;
        let response = check_status(response, &format!("Record {}", id)).await?;

        let json: Value = response.json().await?;

        tracing::debug!("Updated record {} quantity to {}", id, quantity);

        decode_record(&json)
    }

    async fn delete_record(&self, id: &str) -> Result<(), StoreError> {
        let response = self
            .authorized(self.client.delete(self.document_url(id)))
            .send()
            .await?;
        check_status(response, &format!("Record {}", id)).await?;

        tracing::debug!("Deleted record {}", id);

        Ok(())
    }
}
