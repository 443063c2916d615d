//! Parts Locator - inventory lookup service for spare parts
//!
//! Parts live in baskets on two shelves and are stored as documents in a
//! remote Appwrite collection. The core of the crate is the fuzzy search
//! in [`core`]: text normalization, a positional similarity score and the
//! ranking pipeline built on them. Everything else is the host service
//! around it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{normalize, search, similarity};
pub use models::{Record, ScoredRecord, ShelfType, StockLevel};
pub use services::{AppwriteStore, InventoryService, RecordStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        assert_eq!(normalize("Ubicación"), "ubicacion");
        assert_eq!(similarity("abc", "abc"), 1.0);
        assert!(search("", &[]).is_empty());
    }
}
