//! Mock personalization backend.
//!
//! Nothing here persists: preferences and content are echoed back with
//! timestamps. Audio and prompt processing go through the configured
//! [`Transcriber`](naible_core::generation::Transcriber) and
//! [`PromptProcessor`](naible_core::generation::PromptProcessor).

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use naible_core::generation::AudioClip;
use naible_core::{PersonalizedContent, UserPreferences};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const DEFAULT_USER_ID: &str = "default_user";
const DEFAULT_CTA: &str = "Get Started";
const DEFAULT_WELCOME: &str = "Welcome!";
const AUDIO_FIELDS: [&str; 2] = ["audio", "file"];

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/users/anonymous",
            post(create_anonymous_user).fallback(method_not_allowed),
        )
        .route(
            "/api/personalization/preferences",
            get(get_preferences)
                .post(create_preferences)
                .put(update_preferences)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/personalization/content",
            get(get_content)
                .post(save_content)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/conversation/audio",
            post(transcribe_audio).fallback(method_not_allowed),
        )
        .route(
            "/api/conversation/process",
            post(process_conversation).fallback(method_not_allowed),
        )
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

async fn method_not_allowed() -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

fn missing_user_id() -> ApiError {
    ApiError::bad_request("User ID is required")
}

/// Treats missing, empty and blank strings alike.
fn present(field: Option<&str>) -> bool {
    field.is_some_and(|value| !value.trim().is_empty())
}

/// JavaScript-style truthiness: null, false, zero and blank strings are not set.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => present(Some(text.as_str())),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ============================================================================
// Users
// ============================================================================

async fn create_anonymous_user() -> impl IntoResponse {
    let id = format!("anon_{}", Uuid::new_v4());
    tracing::info!(user_id = %id, "[User] Created anonymous user");
    (
        StatusCode::CREATED,
        Json(json!({
            "id": id,
            "createdAt": now(),
            "isAnonymous": true,
        })),
    )
}

// ============================================================================
// Preferences
// ============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserQuery {
    user_id: Option<String>,
}

impl UserQuery {
    fn user_id(self) -> String {
        self.user_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| DEFAULT_USER_ID.to_string())
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct PreferencesBody {
    /// Echoed as sent; any JSON value is accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    values: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    goal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    theme: Option<String>,
}

async fn get_preferences(Query(query): Query<UserQuery>) -> Json<Value> {
    Json(json!({
        "userId": query.user_id(),
        "color": "#4F46E5",
        "values": "Privacy, Security, Trust",
        "goal": "Exploring AI for my business",
        "theme": "system",
        "updatedAt": now(),
    }))
}

fn echo_preferences(
    body: Result<Json<PreferencesBody>, JsonRejection>,
    status: StatusCode,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(body) = body?;
    if !body.user_id.as_ref().is_some_and(truthy) {
        return Err(missing_user_id());
    }

    let mut echo = serde_json::to_value(&body).map_err(|e| ApiError::internal(e.to_string()))?;
    if let Value::Object(fields) = &mut echo {
        fields.insert("updatedAt".to_string(), Value::String(now()));
    }
    Ok((status, Json(echo)))
}

async fn create_preferences(
    body: Result<Json<PreferencesBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    echo_preferences(body, StatusCode::CREATED)
}

async fn update_preferences(
    body: Result<Json<PreferencesBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    echo_preferences(body, StatusCode::OK)
}

// ============================================================================
// Content
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentBody {
    user_id: Option<String>,
    headline: Option<String>,
    subheading: Option<String>,
    cta_text: Option<String>,
    welcome_message: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentRecord {
    user_id: String,
    #[serde(flatten)]
    content: PersonalizedContent,
    created_at: String,
    updated_at: String,
}

impl ContentRecord {
    fn new(user_id: String, content: PersonalizedContent) -> Self {
        let timestamp = now();
        Self {
            user_id,
            content,
            created_at: timestamp.clone(),
            updated_at: timestamp,
        }
    }
}

async fn get_content(Query(query): Query<UserQuery>) -> Json<ContentRecord> {
    Json(ContentRecord::new(
        query.user_id(),
        PersonalizedContent::default(),
    ))
}

async fn save_content(
    body: Result<Json<ContentBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ContentRecord>)> {
    let Json(body) = body?;
    let Some(user_id) = body.user_id.clone().filter(|id| !id.trim().is_empty()) else {
        return Err(missing_user_id());
    };
    if !present(body.headline.as_deref()) || !present(body.subheading.as_deref()) {
        return Err(ApiError::bad_request("Headline and subheading are required"));
    }

    let or_default = |field: Option<String>, default: &str| {
        field
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| default.to_string())
    };
    let content = PersonalizedContent {
        headline: body.headline.unwrap_or_default(),
        subheading: body.subheading.unwrap_or_default(),
        cta_text: or_default(body.cta_text, DEFAULT_CTA),
        welcome_message: or_default(body.welcome_message, DEFAULT_WELCOME),
    };
    Ok((StatusCode::CREATED, Json(ContentRecord::new(user_id, content))))
}

// ============================================================================
// Conversation
// ============================================================================

async fn transcribe_audio(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, axum::extract::multipart::MultipartRejection>,
) -> ApiResult<Json<Value>> {
    let no_audio = || ApiError::bad_request("No audio file provided");
    let mut multipart = multipart.map_err(|_| no_audio())?;

    let mut clip = None;
    while let Some(field) = multipart.next_field().await.map_err(|_| no_audio())? {
        if !field.name().is_some_and(|name| AUDIO_FIELDS.contains(&name)) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("audio.webm").to_string();
        let mime_type = field.content_type().unwrap_or("audio/webm").to_string();
        let bytes = field.bytes().await.map_err(|_| no_audio())?;
        clip = Some(AudioClip {
            bytes: bytes.to_vec(),
            file_name,
            mime_type,
        });
        break;
    }
    let clip = clip.filter(|clip| !clip.is_empty()).ok_or_else(no_audio)?;

    let Some(transcriber) = &state.transcriber else {
        tracing::error!("[Transcription] No transcription backend configured");
        return Err(ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Failed to process audio",
        )
        .with_details("Transcription is not configured"));
    };

    tracing::debug!(bytes = clip.bytes.len(), "[Transcription] Received audio");
    match transcriber.transcribe(clip).await {
        Ok(text) => Ok(Json(json!({ "text": text }))),
        Err(e) if e.is_validation() => Err(no_audio()),
        Err(e) => {
            tracing::error!(error = %e, "[Transcription] Failed to transcribe audio");
            Err(ApiError::internal("Failed to process audio"))
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProcessRequest {
    prompt: Option<String>,
    #[serde(default)]
    user_preferences: Option<UserPreferences>,
}

async fn process_conversation(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ProcessRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = body?;
    let Some(prompt) = request.prompt.filter(|p| !p.trim().is_empty()) else {
        return Err(ApiError::bad_request("No prompt provided"));
    };
    let preferences = request.user_preferences.unwrap_or_default();

    match state.processor.process(&prompt, &preferences).await {
        Ok(content) => Ok(Json(json!({ "content": content }))),
        Err(e) => {
            tracing::error!(error = %e, "[Chat] Failed to process conversation");
            Err(ApiError::internal("Failed to process conversation").with_details(e.to_string()))
        }
    }
}
