use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub gemini_api: &'static str,
    pub whisper: &'static str,
    pub transcription_model: String,
}

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let capabilities = state.pipeline.capabilities();

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy",
            gemini_api: if capabilities.analysis_configured {
                "configured"
            } else {
                "not_configured"
            },
            whisper: "available",
            transcription_model: capabilities.transcription_model,
        }),
    )
}
