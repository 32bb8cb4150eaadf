//! HTTP routes
//!
//! One router per resource, nested under `/api`. Everything except login
//! and the health check sits behind the JWT middleware.

pub mod auth_routes;
pub mod contractor_routes;
pub mod customer_routes;
pub mod dashboard_routes;
pub mod labor_repair_form_routes;
pub mod order_requisition_routes;
pub mod registration_routes;
pub mod vehicle_routes;
pub mod work_order_routes;

use axum::{middleware::from_fn_with_state, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::{auth_middleware, cors_layer};
use crate::state::AppState;

/// `/api` routes that need a bearer token
pub fn create_protected_router(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes::create_auth_router())
        .nest("/dashboard", dashboard_routes::create_dashboard_router())
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/customers", customer_routes::create_customer_router())
        .nest("/contractors", contractor_routes::create_contractor_router())
        .nest("/registrations", registration_routes::create_registration_router())
        .nest("/order-requisitions", order_requisition_routes::create_order_requisition_router())
        .nest("/labor-repair-forms", labor_repair_form_routes::create_labor_repair_form_router())
        .nest("/work-orders", work_order_routes::create_work_order_router())
        .route_layer(from_fn_with_state(state, auth_middleware))
}

/// Full application with health check, login, the protected API and the
/// HTTP layers
pub fn create_app(state: AppState) -> Router {
    let api = Router::new()
        .nest("/auth", auth_routes::create_public_auth_router())
        .merge(create_protected_router(state.clone()));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "mvmis-backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
