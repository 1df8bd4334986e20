//! REST endpoints for the chat assistant.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use super::assistant::{ChatAssistant, QuickReply};
use crate::wizard::WizardManager;
use crate::wizard::routes::status_for;

/// Shared state for chat routes.
#[derive(Clone)]
pub struct ChatRouteState {
    pub assistant: Arc<ChatAssistant>,
    /// The `start` quick reply opens the wizard.
    pub wizard: Arc<WizardManager>,
}

#[derive(Debug, Deserialize)]
pub struct SendRequest {
    pub message: String,
}

/// GET /api/chat/history
async fn get_history(State(state): State<ChatRouteState>) -> impl IntoResponse {
    Json(state.assistant.history().await)
}

/// POST /api/chat
///
/// Returns the appended user and bot messages. Blank input appends nothing.
async fn send_message(
    State(state): State<ChatRouteState>,
    Json(body): Json<SendRequest>,
) -> impl IntoResponse {
    Json(state.assistant.send(&body.message).await)
}

/// POST /api/chat/quick/{kind}
async fn quick_reply(
    State(state): State<ChatRouteState>,
    Path(kind): Path<String>,
) -> Response {
    match QuickReply::parse(&kind) {
        QuickReply::Start => match state.wizard.start().await {
            Ok(snapshot) => Json(json!({"wizard": snapshot})).into_response(),
            Err(e) => (status_for(&e), Json(json!({"error": e.to_string()}))).into_response(),
        },
        kind => Json(json!({"message": state.assistant.quick_reply(kind).await})).into_response(),
    }
}

/// Build the chat REST routes.
pub fn chat_routes(state: ChatRouteState) -> Router {
    Router::new()
        .route("/api/chat", post(send_message))
        .route("/api/chat/history", get(get_history))
        .route("/api/chat/quick/{kind}", post(quick_reply))
        .with_state(state)
}
