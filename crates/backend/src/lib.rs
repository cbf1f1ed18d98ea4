pub mod constants;
pub mod controllers;
pub mod env;
pub mod models;
pub mod pipeline;
pub mod utils;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::env::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/fetch-source", get(controllers::source::fetch::get))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
