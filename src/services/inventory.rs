use crate::core::search;
use crate::models::{CreateRecordRequest, NewRecord, Record, ScoredRecord};
use crate::services::store::{RecordStore, StoreError};
use moka::future::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use validator::Validate;

/// Errors surfaced by inventory operations
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(#[source] Arc<StoreError>),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => ServiceError::NotFound(what),
            other => ServiceError::Store(Arc::new(other)),
        }
    }
}

impl From<Arc<StoreError>> for ServiceError {
    fn from(err: Arc<StoreError>) -> Self {
        match err.as_ref() {
            StoreError::NotFound(what) => ServiceError::NotFound(what.clone()),
            _ => ServiceError::Store(err),
        }
    }
}

/// Shared record list served to searches
pub type Snapshot = Arc<Vec<Record>>;

/// A loaded snapshot tagged with the generation current when its load began
#[derive(Clone)]
struct CachedSnapshot {
    generation: u64,
    records: Snapshot,
}

/// Inventory controller
///
/// Keeps a point-in-time snapshot of the store's records and runs searches
/// against it. A search never sees a half-refreshed list: a reload builds a
/// new `Arc` and swaps it in whole. Every mutation goes through the store
/// first, then bumps the generation and drops the snapshot so the next read
/// reloads. A load that began before the bump is never served to a read
/// that began after it.
pub struct InventoryService<S> {
    store: S,
    snapshots: Cache<String, CachedSnapshot>,
    cache_key: String,
    generation: AtomicU64,
}

impl<S: RecordStore> InventoryService<S> {
    pub fn new(store: S, ttl: Duration) -> Self {
        let snapshots = Cache::builder()
            .max_capacity(1)
            .time_to_live(ttl)
            .build();

        Self {
            store,
            snapshots,
            cache_key: "inventory:snapshot".to_string(),
            generation: AtomicU64::new(0),
        }
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    /// Current record list, loading it from the store on a miss.
    ///
    /// Concurrent misses share a single load. A cached list whose load
    /// started before the latest mutation is discarded and reloaded.
    pub async fn snapshot(&self) -> Result<Snapshot, ServiceError> {
        loop {
            let current = self.generation.load(Ordering::SeqCst);

            let cached = self
                .snapshots
                .try_get_with(self.cache_key.clone(), async {
                    let generation = self.generation.load(Ordering::SeqCst);
                    let records = self.store.list_records().await?;
                    tracing::info!("Loaded inventory snapshot ({} records)", records.len());
                    Ok::<_, StoreError>(CachedSnapshot {
                        generation,
                        records: Arc::new(records),
                    })
                })
                .await?;

            if cached.generation >= current {
                return Ok(cached.records);
            }

            tracing::debug!(
                "Discarding stale inventory snapshot (generation {} < {})",
                cached.generation,
                current
            );
            self.snapshots.invalidate(&self.cache_key).await;
        }
    }

    /// Drop the cached snapshot so the next read reloads from the store
    pub async fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.snapshots.invalidate(&self.cache_key).await;
    }

    /// Rank the current inventory against `query`
    pub async fn search(&self, query: &str) -> Result<Vec<ScoredRecord>, ServiceError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let snapshot = self.snapshot().await?;
        let results = search(query, &snapshot);

        tracing::debug!(
            "Search {:?} matched {} of {} records",
            query,
            results.len(),
            snapshot.len()
        );

        Ok(results)
    }

    pub async fn create(&self, request: CreateRecordRequest) -> Result<Record, ServiceError> {
        request
            .validate()
            .map_err(|e| ServiceError::Validation(e.to_string()))?;

        let name = request.name.trim();
        let location = request.location.trim();
        if name.is_empty() || location.is_empty() {
            return Err(ServiceError::Validation(
                "name and location must not be blank".to_string(),
            ));
        }

        let brand = request
            .brand
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(str::to_string);

        let record = self
            .store
            .create_record(NewRecord {
                name: name.to_string(),
                brand,
                quantity: request.quantity,
                location: location.to_string(),
                shelf_type: request.shelf_type,
                registered_at: chrono::Utc::now(),
            })
            .await?;

        self.invalidate().await;
        tracing::info!("Added record {} ({}) at {}", record.id, record.name, record.location);

        Ok(record)
    }

    pub async fn update_quantity(&self, id: &str, quantity: u32) -> Result<Record, ServiceError> {
        let record = self.store.update_quantity(id, quantity).await?;

        self.invalidate().await;
        tracing::info!("Set quantity of record {} to {}", id, quantity);

        Ok(record)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.store.delete_record(id).await?;

        self.invalidate().await;
        tracing::info!("Deleted record {}", id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShelfType;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::Notify;

    /// In-memory store that counts list calls
    #[derive(Default)]
    struct FakeStore {
        records: Mutex<Vec<Record>>,
        lists: AtomicUsize,
        creates: AtomicUsize,
        /// When set, the next list call reads the records then waits here
        list_gate: Mutex<Option<Arc<Notify>>>,
    }

    impl RecordStore for FakeStore {
        async fn list_records(&self) -> Result<Vec<Record>, StoreError> {
            self.lists.fetch_add(1, Ordering::SeqCst);
            let records = self.records.lock().unwrap().clone();

            let gate = self.list_gate.lock().unwrap().take();
            if let Some(gate) = gate {
                gate.notified().await;
            }

            Ok(records)
        }

        async fn create_record(&self, record: NewRecord) -> Result<Record, StoreError> {
            let id = self.creates.fetch_add(1, Ordering::SeqCst).to_string();
            let record = record.into_record(id);
            self.records.lock().unwrap().push(record.clone());
            Ok(record)
        }

        async fn update_quantity(&self, id: &str, quantity: u32) -> Result<Record, StoreError> {
            let mut records = self.records.lock().unwrap();
            let record = records
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            record.quantity = quantity;
            Ok(record.clone())
        }

        async fn delete_record(&self, id: &str) -> Result<(), StoreError> {
            let mut records = self.records.lock().unwrap();
            let before = records.len();
            records.retain(|r| r.id != id);
            if records.len() == before {
                return Err(StoreError::NotFound(id.to_string()));
            }
            Ok(())
        }
    }

    fn request(name: &str, brand: Option<&str>, location: &str) -> CreateRecordRequest {
        CreateRecordRequest {
            name: name.to_string(),
            brand: brand.map(str::to_string),
            quantity: 5,
            location: location.to_string(),
            shelf_type: ShelfType::B,
        }
    }

    fn service() -> InventoryService<FakeStore> {
        InventoryService::new(FakeStore::default(), Duration::from_secs(300))
    }

    #[test]
    fn test_snapshot_is_cached() {
        let service = service();

        tokio_test::block_on(async {
            let first = service.snapshot().await.unwrap();
            let second = service.snapshot().await.unwrap();
            assert!(Arc::ptr_eq(&first, &second));
        });

        assert_eq!(service.store().lists.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_blank_search_skips_store() {
        let service = service();

        let results = tokio_test::block_on(service.search("  ")).unwrap();

        assert!(results.is_empty());
        assert_eq!(service.store().lists.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_create_invalidates_snapshot() {
        let service = service();

        tokio_test::block_on(async {
            assert!(service.search("filtro").await.unwrap().is_empty());

            service
                .create(request("Filtro de aire", Some("Mann"), "B-2"))
                .await
                .unwrap();

            let results = service.search("filtro").await.unwrap();
            assert_eq!(results.len(), 1);
            assert_eq!(results[0].record.name, "Filtro de aire");
        });

        assert_eq!(service.store().lists.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_create_trims_and_drops_blank_brand() {
        let service = service();

        let record = tokio_test::block_on(service.create(request("  Correa  ", Some("  "), " A-1 ")))
            .unwrap();

        assert_eq!(record.name, "Correa");
        assert_eq!(record.location, "A-1");
        assert!(record.brand.is_none());
        assert!(record.registered_at.is_some());
    }

    #[test]
    fn test_create_rejects_blank_fields() {
        let service = service();

        for bad in [request("", None, "A-1"), request("   ", None, "A-1"), request("Correa", None, "")] {
            let err = tokio_test::block_on(service.create(bad)).unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)));
        }

        assert_eq!(service.store().creates.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_update_and_delete() {
        let service = service();

        tokio_test::block_on(async {
            let record = service.create(request("Bujia", Some("NGK"), "A-3")).await.unwrap();

            let updated = service.update_quantity(&record.id, 12).await.unwrap();
            assert_eq!(updated.quantity, 12);
            assert_eq!(service.search("ngk").await.unwrap()[0].record.quantity, 12);

            service.delete(&record.id).await.unwrap();
            assert!(service.search("ngk").await.unwrap().is_empty());

            let err = service.delete(&record.id).await.unwrap_err();
            assert!(matches!(err, ServiceError::NotFound(_)));
        });
    }

    #[tokio::test]
    async fn test_reload_overlapping_a_create_is_not_served_after_it() {
        let service = service();
        let gate = Arc::new(Notify::new());
        *service.store().list_gate.lock().unwrap() = Some(Arc::clone(&gate));

        // The search reads the empty store, then stalls until the create is done
        let in_flight = service.search("bujia");
        let create = async {
            service.create(request("Bujia", Some("NGK"), "A-3")).await.unwrap();
            gate.notify_one();
        };
        let (in_flight, ()) = tokio::join!(in_flight, create);
        assert!(in_flight.unwrap().is_empty());

        let results = service.search("bujia").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].record.name, "Bujia");
        assert_eq!(service.store().lists.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_invalidate_bumps_generation() {
        let service = service();

        tokio_test::block_on(async {
            let first = service.snapshot().await.unwrap();
            service.invalidate().await;
            let second = service.snapshot().await.unwrap();
            assert!(!Arc::ptr_eq(&first, &second));
        });

        assert_eq!(service.generation.load(Ordering::SeqCst), 1);
    }
}
