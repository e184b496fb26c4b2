//! carenote-server
//!
//! HTTP host for the note composer: form schemas, live previews, AI polish
//! and the knowledge base, for a browser front end.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/forms", get(routes::forms::list_forms))
        .route("/forms/{id}", get(routes::forms::get_form_detail))
        .route("/forms/{id}/preview", post(routes::forms::preview))
        .route("/forms/{id}/polish", post(routes::forms::polish))
        .route("/kb", get(routes::kb::kb_summary))
        .route("/kb/search", get(routes::kb::search))
        .layer(cors)
        .with_state(state)
}
