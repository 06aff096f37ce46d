//! Application route configuration.

use axum::{http::Method, middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    auth_routes, backup_routes, bill_payment_routes, bill_routes, budget_routes, currency_routes,
    expense_routes, health, income_routes, master_data_routes, report_routes, saving_routes,
    savings_target_routes, user_routes,
};
use super::middleware::{auth_middleware, rate_limit_auth_middleware, rate_limit_middleware};
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    // Protected routes (require JWT + general rate limiting)
    let protected = Router::new()
        .nest("/users", user_routes())
        .nest("/incomes", income_routes())
        .nest("/expenses", expense_routes())
        .nest("/budgets", budget_routes())
        .nest("/savings", saving_routes())
        .nest("/master_data", master_data_routes())
        .nest("/bills", bill_routes())
        .nest("/bill_payments", bill_payment_routes())
        .nest("/savings_targets", savings_target_routes())
        .nest("/reports", report_routes())
        .nest("/backup", backup_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    let api = Router::new()
        // Health check (no rate limiting)
        .route("/health", get(health))
        .nest("/currencies", currency_routes())
        // Public authentication routes (stricter rate limiting)
        .nest(
            "/auth",
            auth_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                rate_limit_auth_middleware,
            )),
        )
        .merge(protected);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api)
        // Global middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
