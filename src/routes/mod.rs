// Route exports
pub mod inventory;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use crate::models::ErrorResponse;
use crate::services::RecordStore;

pub use inventory::AppState;

pub fn configure_routes<S: RecordStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(inventory::configure::<S>),
    );
}

fn payload_error(error: &str, message: String, status: StatusCode) -> actix_web::Error {
    let body = ErrorResponse {
        error: error.to_string(),
        message: message.clone(),
        status_code: status.as_u16(),
    };
    error::InternalError::from_response(message, HttpResponse::build(status).json(body)).into()
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    payload_error("invalid_json", format!("Invalid JSON: {}", err), StatusCode::BAD_REQUEST)
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    payload_error("invalid_query", format!("Invalid query: {}", err), StatusCode::BAD_REQUEST)
}

/// Handle path parameter errors
pub fn handle_path_error(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    payload_error("invalid_path", format!("Invalid path: {}", err), StatusCode::BAD_REQUEST)
}
