use axum::{http::Method, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::store::FileConfigStore;

pub mod error;
pub mod routes;

pub use error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FileConfigStore>,
}

async fn health_check_handler() -> &'static str {
    "OK"
}

pub fn create_axum_router(store: Arc<FileConfigStore>) -> Router {
    let app_state = Arc::new(AppState { store });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check_handler))
        .nest("/api", routes::config_routes::create_config_router())
        .layer(cors)
        .with_state(app_state)
}
