use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::ShelfType;

/// Request to add a part to the inventory
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRecordRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    pub quantity: u32,
    #[validate(length(min = 1))]
    pub location: String,
    #[serde(default, rename = "shelfType")]
    pub shelf_type: ShelfType,
}

/// Request to change the stocked quantity of a part
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: u32,
}

/// Query string of the search endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}
