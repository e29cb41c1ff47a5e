use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use naible_application::ControllerOptions;
use naible_application::conversation::ImmediateStepTimer;
use naible_core::generation::Transcriber;
use naible_core::selector::FixedSelector;
use naible_core::storage::MemoryKeyValueStore;
use naible_core::{ConversationStep, PersonalizedContent};
use naible_interaction::LlmContentGenerator;
use naible_interaction::ScriptedTranscriber;
use naible_interaction::transcription::SCRIPTED_TRANSCRIPTS;
use naible_server::{AppState, StateParts, app};
use serde_json::{Value, json};
use tower::ServiceExt;

fn test_state() -> Arc<AppState> {
    let transcriber: Arc<dyn Transcriber> =
        Arc::new(ScriptedTranscriber::new(Arc::new(FixedSelector(0))));
    state_with(Some(transcriber))
}

fn state_with(transcriber: Option<Arc<dyn Transcriber>>) -> Arc<AppState> {
    let generator = LlmContentGenerator::new(None).unwrap();
    let state = AppState::assemble(StateParts {
        store: Arc::new(MemoryKeyValueStore::new()),
        generator: Arc::new(generator),
        transcriber,
        selector: Arc::new(FixedSelector(0)),
        controller: ControllerOptions::default().with_timer(Arc::new(ImmediateStepTimer)),
    })
    .unwrap();
    Arc::new(state)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn send_json(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(router, request).await;
    (status, serde_json::from_str(&body).unwrap())
}

async fn advance(state: &Arc<AppState>, step: &str, response: Value) -> (StatusCode, Value) {
    send_json(
        app(state.clone()),
        json_request(
            "POST",
            "/api/conversation/advance",
            json!({ "step": step, "response": response }),
        ),
    )
    .await
}

// ============================================================================
// Mock backend
// ============================================================================

#[tokio::test]
async fn anonymous_users_get_fresh_ids() {
    let state = test_state();
    let (status, first) =
        send_json(app(state.clone()), empty_request("POST", "/api/users/anonymous")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["isAnonymous"], true);
    assert!(first["id"].as_str().unwrap().starts_with("anon_"));
    assert!(first["createdAt"].is_string());

    let (_, second) = send_json(app(state), empty_request("POST", "/api/users/anonymous")).await;
    assert_ne!(first["id"], second["id"]);
}

#[tokio::test]
async fn preferences_mock_echoes_and_validates() {
    let state = test_state();

    let (status, sample) = send_json(
        app(state.clone()),
        empty_request("GET", "/api/personalization/preferences?userId=u1"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sample["userId"], "u1");
    assert_eq!(sample["values"], "Privacy, Security, Trust");
    assert_eq!(sample["theme"], "system");

    let (status, echo) = send_json(
        app(state.clone()),
        json_request(
            "PUT",
            "/api/personalization/preferences",
            json!({ "userId": "u1", "color": "#ff0000" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(echo["color"], "#ff0000");
    assert!(echo.get("goal").is_none());
    assert!(echo["updatedAt"].is_string());

    let (status, error) = send_json(
        app(state),
        json_request(
            "POST",
            "/api/personalization/preferences",
            json!({ "color": "#ff0000" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error, json!({ "error": "User ID is required" }));
}

#[tokio::test]
async fn preferences_echo_non_string_user_ids() {
    let state = test_state();

    let (status, echo) = send_json(
        app(state.clone()),
        json_request(
            "POST",
            "/api/personalization/preferences",
            json!({ "userId": 42, "goal": "learn" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(echo["userId"], 42);
    assert_eq!(echo["goal"], "learn");

    for falsy in [json!(0), json!(""), json!(null), json!(false)] {
        let (status, _) = send(
            app(state.clone()),
            json_request(
                "PUT",
                "/api/personalization/preferences",
                json!({ "userId": falsy }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn content_mock_applies_defaults() {
    let state = test_state();

    let (_, sample) = send_json(
        app(state.clone()),
        empty_request("GET", "/api/personalization/content"),
    )
    .await;
    assert_eq!(sample["userId"], "default_user");
    assert_eq!(
        sample["welcomeMessage"],
        "Welcome to your personalized Naible experience!"
    );

    let (status, saved) = send_json(
        app(state.clone()),
        json_request(
            "POST",
            "/api/personalization/content",
            json!({ "userId": "u1", "headline": "H", "subheading": "S" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(saved["ctaText"], "Get Started");
    assert_eq!(saved["welcomeMessage"], "Welcome!");

    let (status, error) = send_json(
        app(state),
        json_request(
            "POST",
            "/api/personalization/content",
            json!({ "userId": "u1", "headline": "H" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "Headline and subheading are required");
}

#[tokio::test]
async fn unsupported_methods_are_rejected() {
    let state = test_state();
    let (status, body) = send_json(
        app(state.clone()),
        empty_request("DELETE", "/api/personalization/content"),
    )
    .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({ "error": "Method not allowed" }));

    let (status, _) = send(app(state), empty_request("GET", "/api/conversation/process")).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn process_requires_prompt_and_reports_missing_key() {
    let state = test_state();
    let (status, body) = send_json(
        app(state.clone()),
        json_request("POST", "/api/conversation/process", json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No prompt provided");

    let (status, body) = send_json(
        app(state),
        json_request(
            "POST",
            "/api/conversation/process",
            json!({ "prompt": "hello", "userPreferences": { "color": "#00B67A" } }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to process conversation");
    assert!(body["details"].as_str().unwrap().contains("No API key configured"));
}

fn multipart_request(field: &str, bytes: &[u8]) -> Request<Body> {
    let boundary = "naible-test-boundary";
    let mut body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"clip.webm\"\r\nContent-Type: audio/webm\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/conversation/audio")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn audio_is_transcribed_from_either_field_name() {
    let state = test_state();
    for field in ["audio", "file"] {
        let (status, body) =
            send_json(app(state.clone()), multipart_request(field, b"RIFFdata")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], SCRIPTED_TRANSCRIPTS[0]);
    }
}

#[tokio::test]
async fn audio_without_a_transcription_backend_is_unavailable() {
    let state = state_with(None);
    let (status, body) = send_json(app(state), multipart_request("audio", b"RIFFdata")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Failed to process audio");
    assert_eq!(body["details"], "Transcription is not configured");
    assert!(body.get("text").is_none());
}

#[tokio::test]
async fn audio_without_a_clip_is_a_bad_request() {
    let state = test_state();
    let (status, body) = send_json(app(state.clone()), multipart_request("other", b"x")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No audio file provided");

    let (status, _) = send(
        app(state),
        json_request("POST", "/api/conversation/audio", json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Onboarding
// ============================================================================

#[tokio::test]
async fn conversation_runs_to_hero_over_http() {
    let state = test_state();

    let (status, snapshot) = send_json(
        app(state.clone()),
        empty_request("GET", "/api/conversation/state"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["step"], "privacy_consent");

    advance(&state, "privacy_consent", json!({ "type": "consent", "value": true })).await;
    advance(&state, "introduction", json!({ "type": "start" })).await;
    advance(&state, "color_preference", json!({ "type": "answer", "value": "#00B67A" })).await;
    advance(&state, "values", json!({ "type": "answer", "value": "creativity" })).await;
    let (status, snapshot) =
        advance(&state, "goals", json!({ "type": "answer", "value": "write more" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["preferences"]["goal"], "write more");

    state.controller.wait_for_hero().await.unwrap();
    assert_eq!(
        state.controller.current_step().await,
        ConversationStep::PersonalizedHero
    );
    assert_eq!(
        state.personalization.content().unwrap(),
        Some(PersonalizedContent::fallback(0))
    );

    let (status, css) = send(app(state.clone()), empty_request("GET", "/theme.css")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(css.contains("--color-primary: #00B67A;"));

    let (status, html) = send(app(state), empty_request("GET", "/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Own Your AI: Introducing Personal Intelligence by Naible"));
    assert!(html.contains("--color-primary: #00B67A;"));
}

#[tokio::test]
async fn stale_step_is_a_conflict() {
    let state = test_state();
    let (status, body) =
        advance(&state, "goals", json!({ "type": "answer", "value": "x" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("privacy_consent"));

    let (status, _) = send(
        app(state),
        json_request("POST", "/api/conversation/advance", json!({ "step": "nowhere" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn accessibility_toggle_updates_the_stylesheet() {
    let state = test_state();
    let (status, settings) = send_json(
        app(state.clone()),
        empty_request("POST", "/api/accessibility/large_text/toggle"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["largeText"], true);

    let (_, css) = send(app(state.clone()), empty_request("GET", "/theme.css")).await;
    assert!(css.contains("--base-size: 1.25rem;"));

    let (status, _) = send(
        app(state),
        empty_request("POST", "/api/accessibility/blink/toggle"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn privacy_export_and_delete() {
    let state = test_state();
    state.users.ensure_user().unwrap();
    advance(&state, "privacy_consent", json!({ "type": "consent", "value": true })).await;

    let response = app(state.clone())
        .oneshot(empty_request("GET", "/api/privacy/export?format=csv"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"naible_data_export.csv\""
    );

    let (status, body) = send_json(
        app(state.clone()),
        empty_request("DELETE", "/api/privacy/data"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["step"], "introduction");
    assert!(state.users.current_user().unwrap().is_none());

    let (_, export) = send_json(
        app(state),
        empty_request("GET", "/api/privacy/export"),
    )
    .await;
    assert!(export["user"].is_null());
}

#[tokio::test]
async fn chat_and_suggestions_follow_preferences() {
    let state = test_state();
    let (status, body) = send_json(
        app(state.clone()),
        json_request("POST", "/api/chat", json!({ "message": "Tell me about Naible" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["reply"].as_str().unwrap().starts_with("Naible is focused"));

    let (status, suggestions) =
        send_json(app(state.clone()), empty_request("GET", "/api/suggestions")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(suggestions.as_array().unwrap().len(), 7);
    assert_eq!(suggestions[0]["title"], "Context-aware reminders");

    let (status, health) = send_json(app(state), empty_request("GET", "/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "ok");
}
