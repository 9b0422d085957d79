//! Integration tests for the generation-service client and the summary
//! fallback path.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made. Covers the happy path, every error shape the
//! client can produce, and the pipeline-level guarantee that service
//! failures degrade to the paragraph fallback instead of aborting.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use minutes_analysis::{
    run_pipeline, GenerationClient, ServiceConfig, ServiceError, TranscriptFormat,
};
use minutes_core::Language;

/// Builds a `ServiceConfig` pointing at the mock server, with a short timeout.
fn test_config(server_uri: &str) -> ServiceConfig {
    ServiceConfig {
        api_url: format!("{server_uri}/chat/completions"),
        api_key: "test-key".to_string(),
        model: "deepseek-chat".to_string(),
        timeout_secs: 2,
    }
}

/// Minimal valid chat-completions response carrying `content`.
fn completion_json(content: &str) -> serde_json::Value {
    json!({
        "choices": [{
            "message": { "role": "assistant", "content": content }
        }]
    })
}

// ---------------------------------------------------------------------------
// GenerationClient::complete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn complete_returns_content_on_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_json("the summary")))
        .mount(&server)
        .await;

    let client = GenerationClient::new(&test_config(&server.uri())).unwrap();
    let result = client.complete("system", "user").await;

    assert_eq!(result.unwrap(), "the summary");
}

#[tokio::test]
async fn complete_sends_model_auth_and_token_budget() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "deepseek-chat",
            "max_tokens": 2000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_json("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let client = GenerationClient::new(&test_config(&server.uri())).unwrap();
    client.complete("system", "user").await.unwrap();
}

#[tokio::test]
async fn complete_errors_on_non_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = GenerationClient::new(&test_config(&server.uri())).unwrap();
    let err = client.complete("system", "user").await.unwrap_err();

    assert!(
        matches!(err, ServiceError::Status(status) if status.as_u16() == 500),
        "expected Status(500), got: {err:?}"
    );
}

#[tokio::test]
async fn complete_errors_when_choices_missing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let client = GenerationClient::new(&test_config(&server.uri())).unwrap();
    let err = client.complete("system", "user").await.unwrap_err();

    assert!(
        matches!(err, ServiceError::MalformedResponse(_)),
        "expected MalformedResponse, got: {err:?}"
    );
}

#[tokio::test]
async fn complete_errors_on_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_json("late"))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri());
    config.timeout_secs = 1;
    let client = GenerationClient::new(&config).unwrap();
    let err = client.complete("system", "user").await.unwrap_err();

    assert!(
        matches!(err, ServiceError::Http(_)),
        "expected Http timeout error, got: {err:?}"
    );
}

// ---------------------------------------------------------------------------
// Pipeline-level behavior
// ---------------------------------------------------------------------------

#[tokio::test]
async fn pipeline_uses_service_summary_when_available() {
    let server = MockServer::start().await;

    let content = "Meeting Topic: Q4 planning\nDecisions Made: ship the beta";
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_json(content)))
        .mount(&server)
        .await;

    let config = test_config(&server.uri());
    let result = run_pipeline(
        b"The team met to plan Q4. We agreed on the beta scope.",
        TranscriptFormat::PlainText,
        Language::En,
        Some(&config),
    )
    .await
    .unwrap();

    assert_eq!(result.summary_text, content);
    assert_eq!(result.summary.topic, "Q4 planning");
    assert_eq!(result.summary.decisions, vec!["ship the beta"]);
}

#[tokio::test]
async fn pipeline_falls_back_when_service_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let text = "Opening remarks.\n\nBudget discussion.\n\nStaffing plans.\n\nClosing notes.";
    let config = test_config(&server.uri());
    let result = run_pipeline(
        text.as_bytes(),
        TranscriptFormat::PlainText,
        Language::En,
        Some(&config),
    )
    .await
    .expect("service failure must not abort the pipeline");

    assert_eq!(
        result.summary_text,
        "Opening remarks.\n\nBudget discussion.\n\nStaffing plans.\n\n... (more omitted)"
    );
    // The rest of the result is still fully populated.
    assert!(result.quality.char_count > 0);
    assert_eq!(result.language, Language::En);
}

#[tokio::test]
async fn pipeline_falls_back_when_response_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let text = "Only paragraph in the transcript.";
    let config = test_config(&server.uri());
    let result = run_pipeline(
        text.as_bytes(),
        TranscriptFormat::PlainText,
        Language::En,
        Some(&config),
    )
    .await
    .unwrap();

    assert_eq!(result.summary_text, "Only paragraph in the transcript.");
}

#[tokio::test]
async fn pipeline_sends_transcript_text_in_user_prompt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_json("fine")))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri());
    run_pipeline(
        b"A very identifiable transcript body.",
        TranscriptFormat::PlainText,
        Language::En,
        Some(&config),
    )
    .await
    .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let user_content = body["messages"][1]["content"].as_str().unwrap();
    assert!(user_content.contains("A very identifiable transcript body."));
    assert_eq!(body["messages"][0]["role"], "system");
}
