// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{NewRecord, Record, ScoredRecord, ShelfType, StockLevel};
pub use requests::{CreateRecordRequest, SearchQuery, UpdateQuantityRequest};
pub use responses::{
    DeleteResponse, ErrorResponse, HealthResponse, InventoryItem, InventoryResponse,
    RecordResponse, SearchHit, SearchResponse,
};
