//! Rutas de la API
//!
//! Ensamblado del router: recursos MVC bajo `/api`, más los endpoints
//! operacionales `/health` y `/metrics`.

pub mod booking_routes;
pub mod vehicle_routes;

use axum::{extract::State, http::header, response::Json, routing::get, Router};
use serde_json::json;

use crate::middleware::cors::cors_middleware;
use crate::services::metrics;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Router de recursos bajo `/api`
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/bookings", booking_routes::create_booking_router())
}

/// Aplicación completa, lista para servir. También la usan las pruebas
/// de integración contra el store en memoria.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(render_metrics))
        .nest("/api", create_api_router())
        .layer(cors_middleware())
        .with_state(state)
}

/// Health check simple
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "fleet-booking",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Métricas Prometheus en formato de texto
async fn render_metrics(
    State(state): State<AppState>,
) -> Result<([(header::HeaderName, &'static str); 1], String), AppError> {
    let body = metrics::render(&state.metrics_registry)?;
    Ok(([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body))
}
