use axum::Json;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::domain::{AnalysisOutcome, AnalysisRequest};
use crate::presentation::state::AppState;

use super::audio_form::AudioForm;

#[derive(Serialize)]
pub struct AnalysisResponse {
    pub status: &'static str,
    pub analysis: AnalysisOutcome,
}

#[derive(Serialize)]
pub struct SpeechReportResponse {
    pub status: &'static str,
    pub filename: String,
    pub transcription: String,
    /// `null` when no analysis ran.
    pub analysis: AnalysisOutcome,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReferenceTextQuery {
    pub original_text: Option<String>,
}

#[tracing::instrument(skip(state, request))]
pub async fn analyze_speech_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> impl IntoResponse {
    match state.pipeline.analyze(&request).await {
        Ok(analysis) => {
            tracing::info!(degraded = analysis.is_degraded(), "Speech analyzed");
            (
                StatusCode::OK,
                Json(AnalysisResponse {
                    status: "success",
                    analysis,
                }),
            )
                .into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Reference text may arrive as a form field or a query parameter; a non-blank form field wins.
#[tracing::instrument(skip(state, query, multipart))]
pub async fn upload_and_analyze_handler(
    State(state): State<AppState>,
    Query(query): Query<ReferenceTextQuery>,
    multipart: Multipart,
) -> impl IntoResponse {
    let (upload, form_text) = match AudioForm::read(multipart)
        .await
        .and_then(AudioForm::require_upload)
    {
        Ok(parts) => parts,
        Err(response) => return response,
    };

    let original_text = form_text
        .filter(|text| !text.trim().is_empty())
        .or(query.original_text);

    match state
        .pipeline
        .upload_and_analyze(upload, original_text.as_deref())
        .await
    {
        Ok(report) => (
            StatusCode::OK,
            Json(SpeechReportResponse {
                status: "success",
                filename: report.audio.filename.to_string(),
                transcription: report.transcription,
                analysis: report.analysis,
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
