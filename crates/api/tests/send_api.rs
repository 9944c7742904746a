//! Integration tests for the send endpoints and the composed send flow.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, build_test_app, post_json, RecordingMailer};
use serde_json::json;

use outreach_mailer::EmailTransport;

fn recording_app() -> (axum::Router, Arc<RecordingMailer>) {
    let mailer = Arc::new(RecordingMailer::default());
    let app = build_test_app(Some(mailer.clone() as Arc<dyn EmailTransport>));
    (app, mailer)
}

// ---------------------------------------------------------------------------
// POST /api/send-email
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_email_dispatches_the_composed_message() {
    let (app, mailer) = recording_app();
    let response = post_json(
        app,
        "/api/send-email",
        json!({
            "to": "ada@example.com",
            "subject": "Hello",
            "html": "<p>Hi Ada</p>",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Email sent successfully");

    let sent = mailer.sent.lock().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "ada@example.com");
    assert_eq!(sent[0].1, "Hello");
}

#[tokio::test]
async fn send_email_with_missing_field_never_touches_the_transport() {
    for body in [
        json!({ "subject": "S", "html": "<p>x</p>" }),
        json!({ "to": "a@b.c", "html": "<p>x</p>" }),
        json!({ "to": "a@b.c", "subject": "S" }),
    ] {
        let (app, mailer) = recording_app();
        let response = post_json(app, "/api/send-email", body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(mailer.sent.lock().await.is_empty());
    }
}

#[tokio::test]
async fn send_email_without_a_configured_transport_returns_500() {
    let app = build_test_app(None);
    let response = post_json(
        app,
        "/api/send-email",
        json!({
            "to": "ada@example.com",
            "subject": "Hello",
            "html": "<p>Hi</p>",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_CONFIGURED");
}

// ---------------------------------------------------------------------------
// POST /api/templates/send
// ---------------------------------------------------------------------------

#[tokio::test]
async fn template_send_renders_the_stored_template() {
    let (app, mailer) = recording_app();
    let response = post_json(
        app,
        "/api/templates/send",
        json!({
            "templateId": 1,
            "recipientName": "Sarah Johnson",
            "recipientEmail": "sarah.johnson@techcorp.com",
            "templateData": { "project_name": "AI Integration" },
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let sent = mailer.sent.lock().await;
    assert_eq!(sent.len(), 1);

    let (to, subject, html) = &sent[0];
    assert_eq!(to, "sarah.johnson@techcorp.com");
    assert_eq!(subject, "Thank you for your interest");
    // Placeholders are substituted and the plain-text body is converted
    // to HTML line breaks.
    assert!(html.contains("Dear Sarah Johnson,"));
    assert!(html.contains("AI Integration"));
    assert!(html.contains("<br/>"));
    assert!(!html.contains("{{"));
}

#[tokio::test]
async fn template_send_with_unknown_id_returns_404_without_dispatch() {
    let (app, mailer) = recording_app();
    let response = post_json(
        app,
        "/api/templates/send",
        json!({
            "templateId": 999,
            "recipientEmail": "ada@example.com",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(mailer.sent.lock().await.is_empty());
}

#[tokio::test]
async fn template_send_without_recipient_returns_400() {
    let (app, mailer) = recording_app();
    let response = post_json(
        app,
        "/api/templates/send",
        json!({ "templateId": 1 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(mailer.sent.lock().await.is_empty());
}

#[tokio::test]
async fn template_send_with_overrides_only_skips_the_lookup() {
    let (app, mailer) = recording_app();
    let response = post_json(
        app,
        "/api/templates/send",
        json!({
            "recipientEmail": "ada@example.com",
            "subject": "Override subject",
            "html": "<p>Override body</p>",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let sent = mailer.sent.lock().await;
    assert_eq!(sent[0].1, "Override subject");
    assert_eq!(sent[0].2, "<p>Override body</p>");
}

#[tokio::test]
async fn template_send_overrides_win_over_the_template() {
    let (app, mailer) = recording_app();
    let response = post_json(
        app,
        "/api/templates/send",
        json!({
            "templateId": 1,
            "recipientEmail": "ada@example.com",
            "subject": "Overridden",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let sent = mailer.sent.lock().await;
    assert_eq!(sent[0].1, "Overridden");
    // The body still comes from the stored template.
    assert!(sent[0].2.contains("Thank you for reaching out"));
}

#[tokio::test]
async fn template_send_with_neither_template_nor_overrides_returns_400() {
    let (app, mailer) = recording_app();
    let response = post_json(
        app,
        "/api/templates/send",
        json!({ "recipientEmail": "ada@example.com" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(mailer.sent.lock().await.is_empty());
}

// ---------------------------------------------------------------------------
// POST /api/ai/* without a configured client
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generate_email_without_prompt_returns_400() {
    let app = build_test_app(None);
    let response = post_json(app, "/api/ai/generate-email", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn generate_email_without_a_configured_client_returns_500() {
    let app = build_test_app(None);
    let response = post_json(
        app,
        "/api/ai/generate-email",
        json!({ "prompt": "write a follow-up email" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_CONFIGURED");
}

#[tokio::test]
async fn improve_content_without_content_returns_400() {
    let app = build_test_app(None);
    let response = post_json(app, "/api/ai/improve-content", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn chat_without_user_message_returns_400() {
    let app = build_test_app(None);
    let response = post_json(app, "/api/chat", json!({ "systemPrompt": "be nice" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
