use crate::models::{NewRecord, Record};
use std::future::Future;
use thiserror::Error;

/// Errors that can occur when talking to the record store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or project")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Persistent home of the inventory records.
///
/// The store owns the record lifecycle. Callers that cache what
/// `list_records` returned must drop that copy after any mutation.
pub trait RecordStore: Send + Sync {
    /// Every record, in store order
    fn list_records(&self) -> impl Future<Output = Result<Vec<Record>, StoreError>> + Send;

    /// Persist a new record and return it with its assigned id
    fn create_record(
        &self,
        record: NewRecord,
    ) -> impl Future<Output = Result<Record, StoreError>> + Send;

    fn update_quantity(
        &self,
        id: &str,
        quantity: u32,
    ) -> impl Future<Output = Result<Record, StoreError>> + Send;

    fn delete_record(&self, id: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}
