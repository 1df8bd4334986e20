//! REST endpoints for the wizard, the climate insights and the form option
//! catalogues.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::error::WizardError;
use crate::insights::Insights;

use super::form::{EditField, StepOutput, options};
use super::manager::{WizardManager, WizardSnapshot};
use super::state::WizardStep;

/// Shared state for wizard routes.
#[derive(Clone)]
pub struct WizardRouteState {
    pub manager: Arc<WizardManager>,
}

/// Body of `POST /api/wizard/advance`.
#[derive(Debug, Deserialize)]
pub struct AdvanceRequest {
    pub step: WizardStep,
    pub output: StepOutput,
}

#[derive(Debug, Deserialize)]
pub struct InsightsQuery {
    pub rainfall: f64,
    pub min_temp: f64,
    pub max_temp: f64,
}

/// HTTP status for a rejected wizard call.
pub(crate) fn status_for(err: &WizardError) -> StatusCode {
    match err {
        WizardError::ValidationFailed { .. } | WizardError::SlotMismatch { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        WizardError::UnknownStep(_) => StatusCode::NOT_FOUND,
        WizardError::WrongStep { .. }
        | WizardError::InvalidTransition { .. }
        | WizardError::SubmissionInFlight
        | WizardError::NoEditOpen
        | WizardError::NothingToRetry => StatusCode::CONFLICT,
    }
}

fn respond(result: Result<WizardSnapshot, WizardError>) -> Response {
    match result {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => {
            tracing::debug!(error = %e, "Wizard request rejected");
            (status_for(&e), Json(json!({"error": e.to_string()}))).into_response()
        }
    }
}

/// GET /api/wizard
async fn get_wizard(State(state): State<WizardRouteState>) -> impl IntoResponse {
    Json(state.manager.snapshot().await)
}

/// POST /api/wizard/start
async fn start(State(state): State<WizardRouteState>) -> Response {
    respond(state.manager.start().await)
}

/// GET /api/wizard/draft/{step}
///
/// Initial values for a step's input form. The landing page has none.
async fn get_draft(
    State(state): State<WizardRouteState>,
    Path(step): Path<String>,
) -> Response {
    let step: WizardStep = match step.parse() {
        Ok(step) => step,
        Err(e) => return respond(Err(e)),
    };
    let draft = state.manager.draft(step).await;
    Json(json!({"step": step, "draft": draft})).into_response()
}

/// POST /api/wizard/advance
async fn advance(
    State(state): State<WizardRouteState>,
    Json(body): Json<AdvanceRequest>,
) -> Response {
    respond(state.manager.advance(body.step, body.output).await)
}

/// POST /api/wizard/back
async fn back(State(state): State<WizardRouteState>) -> Response {
    respond(state.manager.go_back().await)
}

/// POST /api/wizard/retry
async fn retry(State(state): State<WizardRouteState>) -> Response {
    respond(state.manager.retry().await)
}

/// POST /api/wizard/start-over
async fn start_over(State(state): State<WizardRouteState>) -> Response {
    respond(state.manager.start_over().await)
}

/// POST /api/wizard/edit/{field}
async fn open_edit(
    State(state): State<WizardRouteState>,
    Path(field): Path<String>,
) -> Response {
    match field.parse::<EditField>() {
        Ok(field) => respond(state.manager.open_edit(field).await),
        Err(e) => respond(Err(e)),
    }
}

/// PUT /api/wizard/edit
async fn update_edit(
    State(state): State<WizardRouteState>,
    Json(buffer): Json<StepOutput>,
) -> Response {
    respond(state.manager.update_edit(buffer).await)
}

/// POST /api/wizard/edit/save
async fn save_edit(State(state): State<WizardRouteState>) -> Response {
    respond(state.manager.save_edit().await)
}

/// POST /api/wizard/edit/cancel
async fn cancel_edit(State(state): State<WizardRouteState>) -> Response {
    respond(state.manager.cancel_edit().await)
}

/// GET /api/insights?rainfall=..&min_temp=..&max_temp=..
async fn get_insights(Query(q): Query<InsightsQuery>) -> impl IntoResponse {
    Json(Insights::new(q.rainfall, q.min_temp, q.max_temp))
}

/// GET /api/options
async fn get_options() -> impl IntoResponse {
    Json(json!({
        "soilColors": options::SOIL_COLORS,
        "fertilizers": options::FERTILIZERS,
        "seasons": options::SEASONS,
        "months": options::MONTHS,
        "crops": options::CROPS,
    }))
}

/// Build the wizard REST routes.
pub fn wizard_routes(state: WizardRouteState) -> Router {
    Router::new()
        .route("/api/wizard", get(get_wizard))
        .route("/api/wizard/start", post(start))
        .route("/api/wizard/draft/{step}", get(get_draft))
        .route("/api/wizard/advance", post(advance))
        .route("/api/wizard/back", post(back))
        .route("/api/wizard/retry", post(retry))
        .route("/api/wizard/start-over", post(start_over))
        .route("/api/wizard/edit", axum::routing::put(update_edit))
        .route("/api/wizard/edit/save", post(save_edit))
        .route("/api/wizard/edit/cancel", post(cancel_edit))
        .route("/api/wizard/edit/{field}", post(open_edit))
        .route("/api/insights", get(get_insights))
        .route("/api/options", get(get_options))
        .with_state(state)
}
