//! Agri Yield: crop yield prediction wizard service.

pub mod chat;
pub mod config;
pub mod error;
pub mod insights;
pub mod prediction;
pub mod store;
pub mod wizard;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;

use crate::chat::{ChatAssistant, ChatRouteState, chat_routes};
use crate::wizard::{WizardManager, WizardRouteState, wizard_routes};

/// GET /health
async fn health() -> &'static str {
    "ok"
}

/// Assemble the full HTTP API.
pub fn app_router(wizard: Arc<WizardManager>, assistant: Arc<ChatAssistant>) -> Router {
    let chat = chat_routes(ChatRouteState {
        assistant,
        wizard: Arc::clone(&wizard),
    });
    Router::new()
        .route("/health", get(health))
        .merge(wizard_routes(WizardRouteState { manager: wizard }))
        .merge(chat)
        .layer(CorsLayer::permissive())
}
