//! Onboarding API over the stored conversation state.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use naible_application::{ConversationSnapshot, ExportFormat, Suggestion};
use naible_core::accessibility::{AccessibilityFlag, AccessibilitySettings};
use naible_core::{ConversationStep, StepResponse};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/conversation/state", get(conversation_state))
        .route("/api/conversation/advance", post(advance_conversation))
        .route("/api/suggestions", get(suggestions))
        .route("/api/chat", post(chat))
        .route("/api/accessibility", get(accessibility))
        .route("/api/accessibility/{flag}/toggle", post(toggle_accessibility))
        .route("/api/privacy/export", get(export_data))
        .route("/api/privacy/data", delete(delete_data))
        .route("/theme.css", get(theme_css))
        .route("/", get(hero_page))
        .route("/health", get(health))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "service": "naible" }))
}

// ============================================================================
// Conversation
// ============================================================================

async fn conversation_state(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ConversationSnapshot>> {
    Ok(Json(state.controller.snapshot().await?))
}

#[derive(Debug, Deserialize)]
struct AdvanceRequest {
    step: ConversationStep,
    response: StepResponse,
}

async fn advance_conversation(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AdvanceRequest>, JsonRejection>,
) -> ApiResult<Json<ConversationSnapshot>> {
    let Json(request) = body?;
    state
        .controller
        .advance(request.step, request.response)
        .await?;
    Ok(Json(state.controller.snapshot().await?))
}

// ============================================================================
// Suggestions and chat
// ============================================================================

async fn suggestions(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Suggestion>>> {
    let preferences = state.personalization.preferences()?;
    Ok(Json(state.suggestions.suggest(&preferences)))
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: String,
}

#[derive(Debug, Serialize)]
struct ChatReply {
    reply: String,
}

async fn chat(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ChatReply>> {
    let Json(request) = body?;
    if request.message.trim().is_empty() {
        return Err(ApiError::bad_request("Message is required"));
    }
    let preferences = state.personalization.preferences()?;
    let reply = state.assistant.reply(&request.message, &preferences);
    Ok(Json(ChatReply { reply }))
}

// ============================================================================
// Accessibility
// ============================================================================

async fn accessibility(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<AccessibilitySettings>> {
    Ok(Json(state.personalization.accessibility()?))
}

async fn toggle_accessibility(
    State(state): State<Arc<AppState>>,
    Path(flag): Path<String>,
) -> ApiResult<Json<AccessibilitySettings>> {
    let flag: AccessibilityFlag = flag
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Unknown accessibility flag '{flag}'")))?;
    Ok(Json(state.personalization.toggle_accessibility(flag)?))
}

// ============================================================================
// Privacy
// ============================================================================

#[derive(Debug, Deserialize)]
struct ExportQuery {
    #[serde(default)]
    format: ExportFormat,
}

async fn export_data(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExportQuery>,
) -> ApiResult<impl IntoResponse> {
    let export = state.privacy.export(query.format)?;
    let disposition = format!("attachment; filename=\"{}\"", export.file_name());
    Ok((
        [
            (header::CONTENT_TYPE, export.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.body,
    ))
}

async fn delete_data(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let step = state.controller.forget(&state.privacy).await?;
    state.personalization.publish()?;
    Ok(Json(json!({ "deleted": true, "step": step })))
}

// ============================================================================
// Pages
// ============================================================================

async fn theme_css(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let css = state.stylesheet_css()?;
    Ok(([(header::CONTENT_TYPE, "text/css; charset=utf-8")], css))
}

async fn hero_page(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    let personalization = &state.personalization;
    let preferences = personalization.preferences()?;
    let content = personalization.content()?.unwrap_or_default();
    let suggestions = state.suggestions.suggest(&preferences);

    let html = state.hero.render(
        &content,
        &state.stylesheet_css()?,
        &suggestions,
        &personalization.accessibility()?,
    )?;
    Ok(Html(html))
}
