use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
    pub gemini_configured: bool,
    pub whisper_available: bool,
}

#[derive(Serialize)]
pub struct Endpoints {
    pub upload_audio: &'static str,
    pub transcribe: &'static str,
    pub analyze: &'static str,
    pub upload_and_analyze: &'static str,
    pub generate_text: &'static str,
}

pub async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(ServiceInfo {
        message: "Speech Analysis API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Endpoints {
            upload_audio: "/upload-audio",
            transcribe: "/upload-audio-and-transcribe",
            analyze: "/analyze-speech",
            upload_and_analyze: "/upload-and-analyze",
            generate_text: "/generate_text",
        },
        gemini_configured: state.pipeline.capabilities().analysis_configured,
        whisper_available: true,
    })
}
