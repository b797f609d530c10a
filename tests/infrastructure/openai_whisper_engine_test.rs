use std::io::Write;

use axum::Router;
use axum::extract::Multipart;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use speech_lab::application::ports::{TranscriptionEngine, TranscriptionError};
use speech_lab::domain::{StoredAudio, StoredFileName};
use speech_lab::infrastructure::audio::OpenAiWhisperEngine;

async fn mock_transcription(headers: HeaderMap, mut multipart: Multipart) -> impl IntoResponse {
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer test-key") {
        return (StatusCode::UNAUTHORIZED, "bad key".to_string());
    }

    let mut model = None;
    let mut language = None;
    let mut file_name = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "model" => model = field.text().await.ok(),
            "language" => language = field.text().await.ok(),
            "file" => file_name = field.file_name().map(String::from),
            _ => {}
        }
    }

    match (model.as_deref(), language.as_deref(), file_name) {
        (Some("whisper-1"), Some("en"), Some(name)) => {
            (StatusCode::OK, format!("  heard {}  \n", name))
        }
        _ => (StatusCode::BAD_REQUEST, "missing fields".to_string()),
    }
}

async fn start_mock_server(app: Router) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/v1", listener.local_addr().unwrap());

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

fn stored_audio(file: &tempfile::NamedTempFile) -> StoredAudio {
    StoredAudio {
        filename: StoredFileName::from_raw("clip.wav"),
        path: file.path().to_path_buf(),
        content_type: "audio/wav".to_string(),
        size_bytes: 4,
    }
}

fn audio_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"RIFF").unwrap();
    file
}

#[tokio::test]
async fn given_valid_upload_when_transcribing_then_returns_trimmed_text() {
    let app = Router::new().route("/v1/audio/transcriptions", post(mock_transcription));
    let (base_url, shutdown_tx) = start_mock_server(app).await;
    let engine = OpenAiWhisperEngine::new(
        "test-key".to_string(),
        Some(format!("{}/", base_url)),
        "whisper-1".to_string(),
        "en".to_string(),
    );
    let file = audio_file();

    let transcript = engine.transcribe(&stored_audio(&file)).await.unwrap();

    assert_eq!(transcript, "heard clip.wav");
    assert_eq!(engine.model_name(), "whisper-1");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_rejected_key_when_transcribing_then_returns_api_error_with_status() {
    let app = Router::new().route("/v1/audio/transcriptions", post(mock_transcription));
    let (base_url, shutdown_tx) = start_mock_server(app).await;
    let engine = OpenAiWhisperEngine::new(
        "wrong-key".to_string(),
        Some(base_url),
        "whisper-1".to_string(),
        "en".to_string(),
    );
    let file = audio_file();

    let result = engine.transcribe(&stored_audio(&file)).await;

    let Err(TranscriptionError::ApiRequestFailed(message)) = result else {
        panic!("expected api error");
    };
    assert!(message.contains("401"));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_missing_file_when_transcribing_then_returns_io_error() {
    let engine = OpenAiWhisperEngine::new(
        "test-key".to_string(),
        Some("http://127.0.0.1:9".to_string()),
        "whisper-1".to_string(),
        "en".to_string(),
    );
    let dir = tempfile::TempDir::new().unwrap();
    let audio = StoredAudio {
        filename: StoredFileName::from_raw("gone.wav"),
        path: dir.path().join("gone.wav"),
        content_type: "audio/wav".to_string(),
        size_bytes: 0,
    };

    let result = engine.transcribe(&audio).await;

    assert!(matches!(result, Err(TranscriptionError::Io(_))));
}
