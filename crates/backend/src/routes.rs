use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::system::auth::middleware::{require_admin, require_auth};
use crate::{handlers, shared, system};

/// GET /health
async fn health() -> (StatusCode, Json<Value>) {
    match shared::data::db::ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "healthy", "database": "connected" })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unhealthy", "database": "disconnected" })),
            )
        }
    }
}

/// All application routes
pub fn configure_routes() -> Router {
    // ========================================
    // PUBLIC
    // ========================================
    let public = Router::new()
        .route("/health", get(health))
        .route("/api/v1/auth/login", post(system::handlers::auth::login))
        .route("/api/v1/auth/refresh", post(system::handlers::auth::refresh))
        .route("/api/v1/auth/logout", post(system::handlers::auth::logout));

    // ========================================
    // AUTHENTICATED
    // ========================================
    let authenticated = Router::new()
        .route(
            "/api/v1/auth/me",
            get(system::handlers::auth::current_user).put(system::handlers::auth::update_current_user),
        )
        // A001 Vehicle reception
        .route(
            "/api/v1/vehicle-receptions",
            get(handlers::a001_vehicle_reception::list)
                .post(handlers::a001_vehicle_reception::create_legacy),
        )
        .route(
            "/api/v1/vehicle-receptions/enhanced",
            post(handlers::a001_vehicle_reception::create_enhanced),
        )
        .route(
            "/api/v1/vehicle-receptions/:id",
            get(handlers::a001_vehicle_reception::get_by_id)
                .put(handlers::a001_vehicle_reception::update)
                .delete(handlers::a001_vehicle_reception::delete),
        )
        // D401 Reception stats
        .route(
            "/api/v1/vehicle-receptions/stats/summary",
            get(handlers::d401_reception_stats::get_stats),
        )
        // D402 Period report
        .route(
            "/api/v1/reports/summary",
            get(handlers::d402_period_report::get_summary),
        )
        .route(
            "/api/v1/reports/generate",
            post(handlers::d402_period_report::generate),
        )
        .route_layer(middleware::from_fn(require_auth));

    // ========================================
    // ADMIN
    // ========================================
    let admin = Router::new()
        .route("/api/v1/auth/register", post(system::handlers::auth::register))
        // D403 Financial report
        .route(
            "/api/v1/reports/financial/summary",
            get(handlers::d403_financial_report::get_summary),
        )
        .route(
            "/api/v1/reports/financial/generate",
            post(handlers::d403_financial_report::generate),
        )
        .route(
            "/api/v1/reports/company-rates",
            get(handlers::d403_financial_report::company_rates),
        )
        .route_layer(middleware::from_fn(require_admin));

    public.merge(authenticated).merge(admin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_build() {
        let _router: Router = configure_routes();
    }
}
