use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

use super::audio_form::AudioForm;

#[derive(Serialize)]
pub struct UploadResponse {
    pub status: &'static str,
    pub filename: String,
    pub file_path: String,
}

#[derive(Serialize)]
pub struct TranscriptionResponse {
    pub status: &'static str,
    pub filename: String,
    pub transcription: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_audio_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> impl IntoResponse {
    let upload = match AudioForm::read(multipart)
        .await
        .and_then(AudioForm::require_upload)
    {
        Ok((upload, _)) => upload,
        Err(response) => return response,
    };

    match state.pipeline.store_upload(upload).await {
        Ok(stored) => {
            tracing::info!(
                filename = %stored.filename,
                bytes = stored.size_bytes,
                "Audio uploaded"
            );
            (
                StatusCode::OK,
                Json(UploadResponse {
                    status: "success",
                    filename: stored.filename.to_string(),
                    file_path: stored.path.display().to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => e.into_response(),
    }
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> impl IntoResponse {
    let upload = match AudioForm::read(multipart)
        .await
        .and_then(AudioForm::require_upload)
    {
        Ok((upload, _)) => upload,
        Err(response) => return response,
    };

    match state.pipeline.transcribe_upload(upload).await {
        Ok(transcribed) => {
            tracing::info!(
                filename = %transcribed.audio.filename,
                chars = transcribed.transcription.len(),
                "Audio transcribed"
            );
            (
                StatusCode::OK,
                Json(TranscriptionResponse {
                    status: "success",
                    filename: transcribed.audio.filename.to_string(),
                    transcription: transcribed.transcription,
                }),
            )
                .into_response()
        }
        Err(e) => e.into_response(),
    }
}
