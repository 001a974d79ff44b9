//! # Tillpoint REST API
//!
//! Axum router and application state for the POS backend.
//!
//! ## Surface
//! ```text
//! Public:
//!   GET  /health
//!   POST /auth/login
//!
//! Bearer-token protected:
//!   POST /bills            GET /bills
//!   GET  /bills/:id        GET /bills/:id/items
//!   CRUD /items            CRUD /customers
//!   CRUD /users            (ADMIN only)
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;

use axum::{
    middleware as axum_middleware,
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{auth as auth_handlers, bills, customers, health, items, users};
use tillpoint_billing::BillingService;
use tillpoint_db::Database;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub billing: BillingService,
    pub config: ApiConfig,
}

/// Creates the API router with all routes and middleware.
pub fn create_router(db: Database, config: ApiConfig) -> Router {
    let billing = BillingService::with_sqlite(db.clone());
    let state = AppState {
        db,
        billing,
        config,
    };

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/auth/login", axum::routing::post(auth_handlers::login));

    let bill_routes = Router::new()
        .route("/", axum::routing::post(bills::create_bill).get(bills::list_bills))
        .route("/:id", get(bills::get_bill))
        .route("/:id/items", get(bills::bill_items));

    let item_routes = Router::new()
        .route("/", get(items::list).post(items::create))
        .route("/:id", get(items::get).put(items::update).delete(items::remove));

    let customer_routes = Router::new()
        .route("/", get(customers::list).post(customers::create))
        .route(
            "/:id",
            get(customers::get).put(customers::update).delete(customers::remove),
        );

    let user_routes = Router::new()
        .route("/", get(users::list).post(users::create))
        .route("/:id", get(users::get).put(users::update).delete(users::remove));

    let protected_routes = Router::new()
        .nest("/bills", bill_routes)
        .nest("/items", item_routes)
        .nest("/customers", customer_routes)
        .nest("/users", user_routes)
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
