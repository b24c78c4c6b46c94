//! Tests for request building, response parsing, and the call path.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use kipi_common::GenerationConfig;

use super::*;
use crate::outcome::PLACEHOLDER_CREDENTIAL;
use crate::{CallResult, ErrorKind, ModelClient};

fn client_for(api_base: &str) -> GeminiClient {
    GeminiClient::new(
        GeminiConfig::default()
            .with_api_base(api_base)
            .with_request_timeout(Duration::from_millis(500)),
    )
    .unwrap()
}

/// Accept one connection, capture the raw request, and reply with `status` and `body`.
async fn one_shot_server(
    status: &'static str,
    body: String,
) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
            if request_complete(&raw) {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&raw).into_owned()
    });

    (base, handle)
}

fn request_complete(raw: &[u8]) -> bool {
    let text = String::from_utf8_lossy(raw);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..header_end]
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    raw.len() >= header_end + 4 + content_length
}

#[test]
fn api_url_includes_model_and_method() {
    let client = client_for("http://localhost:1234/v1beta/models/");
    assert_eq!(
        client.api_url("gemini-2.5-flash"),
        "http://localhost:1234/v1beta/models/gemini-2.5-flash:generateContent"
    );
}

#[test]
fn request_body_carries_prompt_and_parameters() {
    let client = client_for(DEFAULT_API_BASE);
    let generation = GenerationConfig {
        temperature: 1.5,
        max_output_tokens: 300,
        ..Default::default()
    };
    let body = client.build_request_body("hello there", &generation);

    let contents = body["contents"].as_array().unwrap();
    assert_eq!(contents.len(), 1);
    assert_eq!(contents[0]["role"], "user");
    assert_eq!(contents[0]["parts"][0]["text"], "hello there");
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 300);
    assert_eq!(body["generationConfig"]["temperature"], 1.5);
}

#[test]
fn parse_response_joins_text_parts() {
    let client = client_for(DEFAULT_API_BASE);
    let json = serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": "Hello, " }, { "text": "world" }] },
            "finishReason": "STOP"
        }]
    });
    assert_eq!(client.parse_response(&json).unwrap(), "Hello, world");
}

#[test]
fn parse_response_without_candidates_is_error() {
    let client = client_for(DEFAULT_API_BASE);
    let err = client
        .parse_response(&serde_json::json!({ "promptFeedback": {} }))
        .unwrap_err();
    assert!(err.to_string().contains("no candidates"));
}

#[test]
fn parse_response_without_text_reports_finish_reason() {
    let client = client_for(DEFAULT_API_BASE);
    let json = serde_json::json!({
        "candidates": [{ "content": { "parts": [] }, "finishReason": "SAFETY" }]
    });
    let err = client.parse_response(&json).unwrap_err();
    assert!(err.to_string().contains("SAFETY"));
}

#[tokio::test]
async fn empty_credential_returns_demo_without_network() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let client = client_for(&format!("http://{}", listener.local_addr().unwrap()));

    for credential in ["", PLACEHOLDER_CREDENTIAL] {
        let result = client
            .generate("what is ownership?", &GenerationConfig::default(), credential)
            .await;
        assert_eq!(result.error_kind(), None);
        assert!(result.into_reply_text().contains("what is ownership?"));
    }

    let accepted = tokio::time::timeout(Duration::from_millis(50), listener.accept()).await;
    assert!(accepted.is_err(), "offline mode must not open a connection");
}

#[tokio::test]
async fn successful_call_sends_key_and_returns_text() {
    let body = serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": "Borrowing rules." }] } }]
    })
    .to_string();
    let (base, server) = one_shot_server("200 OK", body).await;
    let client = client_for(&base);

    let result = client
        .generate("explain borrowing", &GenerationConfig::default(), "test-key")
        .await;
    assert_eq!(result, CallResult::Success("Borrowing rules.".into()));

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /gemini-2.5-flash:generateContent"));
    assert!(request.to_ascii_lowercase().contains("x-goog-api-key: test-key"));
    assert!(request.contains("explain borrowing"));
}

#[tokio::test]
async fn invalid_key_is_classified_as_auth() {
    let body = serde_json::json!({
        "error": {
            "code": 400,
            "message": "API key not valid. Please pass a valid API key.",
            "status": "INVALID_ARGUMENT",
            "details": [{ "reason": "API_KEY_INVALID" }]
        }
    })
    .to_string();
    let (base, _server) = one_shot_server("400 Bad Request", body).await;
    let client = client_for(&base);

    let result = client
        .generate("hi", &GenerationConfig::default(), "bad-key")
        .await;
    assert_eq!(result.error_kind(), Some(ErrorKind::Auth));
    assert!(result.into_reply_text().contains("'hi'"));
}

#[tokio::test]
async fn too_many_requests_is_rate_limited() {
    let body = serde_json::json!({
        "error": { "code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED" }
    })
    .to_string();
    let (base, _server) = one_shot_server("429 Too Many Requests", body).await;
    let client = client_for(&base);

    let result = client
        .generate("hi", &GenerationConfig::default(), "key")
        .await;
    assert_eq!(result.error_kind(), Some(ErrorKind::RateLimited));
}

#[tokio::test]
async fn server_error_is_unknown() {
    let (base, _server) = one_shot_server("500 Internal Server Error", "{}".into()).await;
    let client = client_for(&base);

    let result = client
        .generate("hi", &GenerationConfig::default(), "key")
        .await;
    assert_eq!(result.error_kind(), Some(ErrorKind::Unknown));
}

#[tokio::test]
async fn unresponsive_server_times_out_as_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let _hold = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(socket);
    });
    let client = GeminiClient::new(
        GeminiConfig::default()
            .with_api_base(base)
            .with_request_timeout(Duration::from_millis(100)),
    )
    .unwrap();

    let result = client
        .generate("still there?", &GenerationConfig::default(), "key")
        .await;
    assert!(result.error_kind().is_some());
    assert!(result.into_reply_text().contains("still there?"));
}
