use serde::{Deserialize, Serialize};
use crate::models::domain::{Record, ScoredRecord, StockLevel};

/// A record as listed by the inventory endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(flatten)]
    pub record: Record,
    #[serde(rename = "stockLevel")]
    pub stock_level: StockLevel,
}

impl From<&Record> for InventoryItem {
    fn from(record: &Record) -> Self {
        Self {
            stock_level: record.stock_level(),
            record: record.clone(),
        }
    }
}

/// Response for the inventory listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryResponse {
    pub items: Vec<InventoryItem>,
    pub total: usize,
}

/// A single search hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub record: Record,
    pub score: f64,
    #[serde(rename = "matchPercent")]
    pub match_percent: u32,
    #[serde(rename = "stockLevel")]
    pub stock_level: StockLevel,
}

impl From<ScoredRecord> for SearchHit {
    fn from(scored: ScoredRecord) -> Self {
        Self {
            match_percent: scored.match_percent(),
            stock_level: scored.record.stock_level(),
            score: scored.score,
            record: scored.record,
        }
    }
}

/// Response for the search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchHit>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

/// Response for create and update endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordResponse {
    pub record: Record,
}

/// Response for the delete endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub id: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
