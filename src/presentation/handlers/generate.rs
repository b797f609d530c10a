use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::infrastructure::observability::sanitize_for_log;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct GenerateTextRequest {
    pub prompt: String,
}

#[derive(Serialize)]
pub struct GenerateTextResponse {
    pub generated_text: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn generate_text_handler(
    State(state): State<AppState>,
    Json(request): Json<GenerateTextRequest>,
) -> impl IntoResponse {
    tracing::debug!(prompt = %sanitize_for_log(&request.prompt), "Generating text");

    match state.pipeline.generate_text(&request.prompt).await {
        Ok(generated_text) => {
            (StatusCode::OK, Json(GenerateTextResponse { generated_text })).into_response()
        }
        Err(e) => e.into_response(),
    }
}
