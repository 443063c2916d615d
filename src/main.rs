use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use parts_locator::config::{LoggingSettings, Settings};
use parts_locator::routes::{self, AppState};
use parts_locator::services::{AppwriteStore, InventoryService};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level when set
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "json" => subscriber.json().init(),
        "pretty" => subscriber.pretty().init(),
        _ => subscriber.init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();

    // Fall back to default log output so a bad configuration is still reported
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();
    init_logging(&logging);

    info!("Starting Parts Locator service...");

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    info!("Configuration loaded successfully");

    let timeout = Duration::from_secs(settings.appwrite.timeout_secs.unwrap_or(30));
    let store = AppwriteStore::new(
        settings.appwrite.endpoint,
        settings.appwrite.api_key,
        settings.appwrite.project_id,
        settings.appwrite.database_id,
        settings.collection.inventory.clone(),
        timeout,
    )
    .map_err(|e| {
        error!("Failed to create Appwrite client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    info!("Appwrite store initialized (collection: {})", settings.collection.inventory);

    let ttl_secs = settings.cache.ttl_secs.unwrap_or(300);
    let inventory = Arc::new(InventoryService::new(store, Duration::from_secs(ttl_secs)));

    // Warm the snapshot; the service still starts if the store is unreachable
    match inventory.snapshot().await {
        Ok(snapshot) => info!("Inventory snapshot warmed ({} records)", snapshot.len()),
        Err(e) => error!("Initial inventory load failed, will retry on first request: {}", e),
    }

    let app_state = AppState { inventory };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(2);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(routes::handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(routes::handle_query_payload_error))
            .app_data(web::PathConfig::default().error_handler(routes::handle_path_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes::<AppwriteStore>)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
