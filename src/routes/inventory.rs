use actix_web::{web, HttpResponse, Responder};
use crate::models::{
    CreateRecordRequest, DeleteResponse, ErrorResponse, HealthResponse, InventoryItem,
    InventoryResponse, RecordResponse, SearchHit, SearchQuery, SearchResponse,
    UpdateQuantityRequest,
};
use crate::services::{InventoryService, RecordStore, ServiceError};
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState<S> {
    pub inventory: Arc<InventoryService<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            inventory: Arc::clone(&self.inventory),
        }
    }
}

/// Configure all inventory routes
pub fn configure<S: RecordStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/inventory", web::get().to(list_inventory::<S>))
        .route("/inventory", web::post().to(create_record::<S>))
        .route("/inventory/search", web::get().to(search::<S>))
        .route("/inventory/{id}", web::patch().to(update_quantity::<S>))
        .route("/inventory/{id}", web::delete().to(delete_record::<S>));
}

fn error_response(err: &ServiceError) -> HttpResponse {
    match err {
        ServiceError::Validation(message) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: message.clone(),
            status_code: 400,
        }),
        ServiceError::NotFound(message) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Record not found".to_string(),
            message: message.clone(),
            status_code: 404,
        }),
        ServiceError::Store(e) => {
            tracing::error!("Record store failure: {}", e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "Record store unavailable".to_string(),
                message: e.to_string(),
                status_code: 502,
            })
        }
    }
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Full inventory listing
///
/// GET /api/v1/inventory
async fn list_inventory<S: RecordStore>(state: web::Data<AppState<S>>) -> HttpResponse {
    match state.inventory.snapshot().await {
        Ok(snapshot) => {
            let items: Vec<InventoryItem> = snapshot.iter().map(InventoryItem::from).collect();
            HttpResponse::Ok().json(InventoryResponse {
                total: items.len(),
                items,
            })
        }
        Err(e) => error_response(&e),
    }
}

/// Fuzzy search over name and brand
///
/// GET /api/v1/inventory/search?q={query}
///
/// An empty `q` returns no results rather than the whole inventory.
async fn search<S: RecordStore>(
    state: web::Data<AppState<S>>,
    query: web::Query<SearchQuery>,
) -> HttpResponse {
    let query = query.into_inner().q;

    match state.inventory.search(&query).await {
        Ok(results) => {
            let results: Vec<SearchHit> = results.into_iter().map(SearchHit::from).collect();

            tracing::info!("Search {:?} returned {} results", query, results.len());

            HttpResponse::Ok().json(SearchResponse {
                query,
                total_results: results.len(),
                results,
            })
        }
        Err(e) => error_response(&e),
    }
}

/// Add a part
///
/// POST /api/v1/inventory
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "brand": "string",
///   "quantity": 0,
///   "location": "A-3-B",
///   "shelfType": "A|B"
/// }
/// ```
async fn create_record<S: RecordStore>(
    state: web::Data<AppState<S>>,
    req: web::Json<CreateRecordRequest>,
) -> HttpResponse {
    match state.inventory.create(req.into_inner()).await {
        Ok(record) => HttpResponse::Created().json(RecordResponse { record }),
        Err(e) => {
            tracing::info!("Create rejected: {}", e);
            error_response(&e)
        }
    }
}

/// Change a part's quantity
///
/// PATCH /api/v1/inventory/{id}
async fn update_quantity<S: RecordStore>(
    state: web::Data<AppState<S>>,
    path: web::Path<String>,
    req: web::Json<UpdateQuantityRequest>,
) -> HttpResponse {
    let id = path.into_inner();

    match state.inventory.update_quantity(&id, req.quantity).await {
        Ok(record) => HttpResponse::Ok().json(RecordResponse { record }),
        Err(e) => error_response(&e),
    }
}

/// Remove a part
///
/// DELETE /api/v1/inventory/{id}
async fn delete_record<S: RecordStore>(
    state: web::Data<AppState<S>>,
    path: web::Path<String>,
) -> HttpResponse {
    let id = path.into_inner();

    match state.inventory.delete(&id).await {
        Ok(()) => HttpResponse::Ok().json(DeleteResponse { success: true, id }),
        Err(e) => error_response(&e),
    }
}
