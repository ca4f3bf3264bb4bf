use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use hawaii_match::config::{LoggingSettings, Settings};
use hawaii_match::core::Matcher;
use hawaii_match::models::ErrorResponse;
use hawaii_match::routes::{self, matching::AppState};
use hawaii_match::services::{MatchingService, PostgresCatalog};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn json_error(status: StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

/// Handle query payload errors
fn handle_query_payload_error(err: error::QueryPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    info!("Query payload error on {}: {}", req.path(), err);
    let response = json_error(StatusCode::BAD_REQUEST, "invalid_query", format!("Invalid query: {}", err));
    error::InternalError::from_response(err, response).into()
}

/// Handle path parameter errors, e.g. a non-numeric id
fn handle_path_error(err: error::PathError, req: &actix_web::HttpRequest) -> actix_web::Error {
    info!("Path error on {}: {}", req.path(), err);
    let response = json_error(StatusCode::BAD_REQUEST, "invalid_path", format!("Invalid path: {}", err));
    error::InternalError::from_response(err, response).into()
}

fn init_tracing(logging: &LoggingSettings) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&logging.level))
        .with_target(false)
        .with_level(true);

    if logging.is_pretty() {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // A config error is logged with default logging settings
    let settings = Settings::load();
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default()
        .with_env_overrides();
    init_tracing(&logging);

    info!("Starting Hawaii lead matching service...");

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    info!("Configuration loaded successfully");

    let postgres = PostgresCatalog::from_settings(
        &settings.database.url,
        settings.database.max_connections,
        settings.database.min_connections,
        settings.database.acquire_timeout_secs,
    )
    .await
    .map(Arc::new)
    .map_err(|e| {
        error!("Failed to connect to PostgreSQL: {}", e);
        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e)
    })?;

    info!(
        "PostgreSQL catalog initialized (max: {} connections)",
        settings.database.max_connections.unwrap_or(10)
    );

    let rules = settings.scoring_rules();
    info!("Matcher initialized with rules: {:?}", rules);

    let matching = MatchingService::new(postgres.clone(), Matcher::new(rules))
        .with_page_size(settings.matching.page_size)
        .with_investor_statuses(settings.matching.investor_statuses.clone());

    let app_state = AppState {
        matching,
        postgres: Some(postgres),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .app_data(web::PathConfig::default().error_handler(handle_path_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
