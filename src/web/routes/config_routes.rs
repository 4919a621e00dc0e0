use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tracing::info;

use crate::config::models::RawDocument;
use crate::store::ConfigStore;
use crate::web::{AppError, AppState};

pub fn create_config_router() -> Router<Arc<AppState>> {
    Router::new().route("/config", get(get_config).post(update_config))
}

// Handler returning the full persisted configuration document
async fn get_config(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<RawDocument>, AppError> {
    let document = app_state.store.fetch().await?;
    Ok(Json(document))
}

// Handler replacing the configuration document wholesale. Validation happens
// on the editing side before save; this surface is the dumb store.
async fn update_config(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<RawDocument>,
) -> Result<impl IntoResponse, AppError> {
    app_state.store.persist(&payload).await?;
    info!(
        destinations = payload.destinations.len(),
        rules = payload.rules.len(),
        "Configuration document saved."
    );
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "message": "Configuration saved." })),
    ))
}
