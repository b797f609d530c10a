use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::response::Response;

use crate::domain::UploadedAudio;

use super::error::error_response;

const AUDIO_FIELD: &str = "audio_file";
const ORIGINAL_TEXT_FIELD: &str = "original_text";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";
const FALLBACK_FILENAME: &str = "upload";

/// The parts of an upload form the audio endpoints care about.
#[derive(Debug, Default)]
pub struct AudioForm {
    pub upload: Option<UploadedAudio>,
    pub original_text: Option<String>,
}

impl AudioForm {
    /// Reads every field. The audio is `audio_file`, or the first other field
    /// that carries a filename; unknown text fields are ignored.
    pub async fn read(mut multipart: Multipart) -> Result<Self, Response> {
        let mut form = AudioForm::default();

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read multipart");
                    return Err(error_response(
                        StatusCode::BAD_REQUEST,
                        format!("Failed to read multipart: {}", e),
                    ));
                }
            };

            let name = field.name().unwrap_or_default().to_string();
            let filename = field.file_name().map(String::from);

            if name == ORIGINAL_TEXT_FIELD && filename.is_none() {
                let text = field.text().await.map_err(|e| {
                    error_response(
                        StatusCode::BAD_REQUEST,
                        format!("Failed to read {}: {}", ORIGINAL_TEXT_FIELD, e),
                    )
                })?;
                form.original_text = Some(text);
                continue;
            }

            let is_audio_field = name == AUDIO_FIELD || filename.is_some();
            if !is_audio_field || form.upload.is_some() {
                tracing::debug!(field = %name, "Ignoring multipart field");
                continue;
            }

            let content_type = field
                .content_type()
                .unwrap_or(FALLBACK_CONTENT_TYPE)
                .to_string();
            let data = field.bytes().await.map_err(|e| {
                tracing::warn!(error = %e, "Failed to read file bytes");
                error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read file: {}", e),
                )
            })?;

            form.upload = Some(UploadedAudio::new(
                filename.unwrap_or_else(|| FALLBACK_FILENAME.to_string()),
                content_type,
                data,
            ));
        }

        Ok(form)
    }

    pub fn require_upload(self) -> Result<(UploadedAudio, Option<String>), Response> {
        match self.upload {
            Some(upload) => Ok((upload, self.original_text)),
            None => {
                tracing::warn!("Upload request with no audio file");
                Err(error_response(
                    StatusCode::BAD_REQUEST,
                    "No audio file provided",
                ))
            }
        }
    }
}
