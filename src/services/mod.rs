// Service exports
pub mod appwrite;
pub mod inventory;
pub mod store;

pub use appwrite::AppwriteStore;
pub use inventory::{InventoryService, ServiceError, Snapshot};
pub use store::{RecordStore, StoreError};
