pub mod calibration;
pub mod config;
pub mod errors;
pub mod format;
pub mod handlers;
pub mod interpolate;
pub mod models;
pub mod pacing;
pub mod prediction;
pub mod request_id;
pub mod targets;
pub mod types;

use std::sync::Arc;

use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
};

use crate::{
    calibration::Calibration,
    config::ServerConfig,
    handlers::{
        calculate_targets, get_handicap, health_check, list_checkpoints, openapi_json,
        predict_placement,
    },
    request_id::request_id_middleware,
};

pub fn create_router(calibration: Arc<Calibration>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/openapi.json", get(openapi_json))
        // Reference data
        .route("/checkpoints", get(list_checkpoints))
        .route("/handicap", get(get_handicap))
        // Race model
        .route("/targets", post(calculate_targets))
        .route("/predict", post(predict_placement))
        .layer(Extension(calibration))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(CompressionLayer::new())
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
}

pub async fn run_server(config: ServerConfig, calibration: Arc<Calibration>) -> anyhow::Result<()> {
    let app = create_router(calibration);

    let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;

    tracing::info!("Server running on http://{}", config.socket_addr());

    axum::serve(listener, app).await?;

    Ok(())
}
