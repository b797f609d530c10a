use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use speech_lab::application::ports::{LlmClient, LlmClientError};
use speech_lab::infrastructure::llm::GeminiClient;
use speech_lab::presentation::config::LlmSettings;

const MODEL_ROUTE: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

#[derive(Clone, Default)]
struct Captured {
    body: Arc<Mutex<Option<Value>>>,
    api_key: Arc<Mutex<Option<String>>>,
}

async fn start_mock_gemini(
    status: StatusCode,
    response: Value,
) -> (String, Captured, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let captured = Captured::default();

    let app = Router::new()
        .route(
            MODEL_ROUTE,
            post(
                move |State(captured): State<Captured>,
                      headers: HeaderMap,
                      Json(body): Json<Value>| {
                    let response = response.clone();
                    async move {
                        *captured.body.lock().unwrap() = Some(body);
                        *captured.api_key.lock().unwrap() = headers
                            .get("x-goog-api-key")
                            .and_then(|v| v.to_str().ok())
                            .map(String::from);
                        (status, Json(response)).into_response()
                    }
                },
            ),
        )
        .with_state(captured.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/v1beta", listener.local_addr().unwrap());

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, captured, shutdown_tx)
}

fn settings(base_url: String) -> LlmSettings {
    LlmSettings {
        api_key: Some("gem-key".to_string()),
        base_url,
        temperature: Some(0.2),
        timeout_secs: 5,
        ..LlmSettings::default()
    }
}

#[tokio::test]
async fn given_candidate_with_parts_when_completing_then_joins_part_text() {
    let response = json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": "Hello, "}, {"text": "reader."}]},
            "finishReason": "STOP"
        }]
    });
    let (base_url, captured, shutdown_tx) = start_mock_gemini(StatusCode::OK, response).await;
    let client = GeminiClient::new("gem-key".to_string(), &settings(base_url)).unwrap();

    let text = client.complete("Say hello").await.unwrap();

    assert_eq!(text, "Hello, reader.");
    assert_eq!(captured.api_key.lock().unwrap().as_deref(), Some("gem-key"));
    let body = captured.body.lock().unwrap().clone().unwrap();
    assert_eq!(body["contents"][0]["parts"][0]["text"], "Say hello");
    assert_eq!(body["generationConfig"]["temperature"], json!(0.2));
    assert!(body["generationConfig"].get("maxOutputTokens").is_none());
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_rate_limit_when_completing_then_returns_rate_limited() {
    let (base_url, _captured, shutdown_tx) =
        start_mock_gemini(StatusCode::TOO_MANY_REQUESTS, json!({})).await;
    let client = GeminiClient::new("gem-key".to_string(), &settings(base_url)).unwrap();

    let result = client.complete("hi").await;

    assert!(matches!(result, Err(LlmClientError::RateLimited)));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_server_error_when_completing_then_returns_api_error_with_status() {
    let (base_url, _captured, shutdown_tx) = start_mock_gemini(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": {"message": "internal"}}),
    )
    .await;
    let client = GeminiClient::new("gem-key".to_string(), &settings(base_url)).unwrap();

    let result = client.complete("hi").await;

    let Err(LlmClientError::ApiRequestFailed(message)) = result else {
        panic!("expected api error");
    };
    assert!(message.starts_with("HTTP 500"));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_blocked_prompt_when_completing_then_returns_invalid_response() {
    let response = json!({"promptFeedback": {"blockReason": "SAFETY"}});
    let (base_url, _captured, shutdown_tx) = start_mock_gemini(StatusCode::OK, response).await;
    let client = GeminiClient::new("gem-key".to_string(), &settings(base_url)).unwrap();

    let result = client.complete("hi").await;

    let Err(LlmClientError::InvalidResponse(message)) = result else {
        panic!("expected invalid response");
    };
    assert!(message.contains("SAFETY"));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_no_candidates_when_completing_then_returns_invalid_response() {
    let (base_url, _captured, shutdown_tx) =
        start_mock_gemini(StatusCode::OK, json!({"candidates": []})).await;
    let client = GeminiClient::new("gem-key".to_string(), &settings(base_url)).unwrap();

    let result = client.complete("hi").await;

    assert!(matches!(result, Err(LlmClientError::InvalidResponse(_))));
    shutdown_tx.send(()).ok();
}

#[test]
fn given_prefixed_model_name_when_creating_client_then_prefix_is_stripped() {
    let settings = LlmSettings {
        model: "models/gemini-1.5-pro".to_string(),
        ..LlmSettings::default()
    };

    let client = GeminiClient::new("k".to_string(), &settings).unwrap();

    assert_eq!(client.model_name(), "gemini-1.5-pro");
}
