//! Pulls a structured analysis out of free-form model output.
//!
//! Models wrap their JSON in prose or markdown fences often enough that the
//! raw text cannot be handed to `serde_json` directly. Candidates are tried in
//! a fixed order, each falling through to the next:
//!
//! 1. the body of a ```` ```json ```` fenced block,
//! 2. the span from the first `{` to the last `}`,
//! 3. the whole text.
//!
//! When no candidate yields a complete [`AnalysisResult`], the degraded result
//! is returned instead of an error.

use crate::domain::{AnalysisOutcome, AnalysisResult};

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Highest-precedence JSON candidate in `text`.
pub fn extract_json_candidate(text: &str) -> &str {
    json_candidates(text).next().unwrap_or(text)
}

pub fn parse_analysis(text: &str) -> AnalysisOutcome {
    for candidate in json_candidates(text) {
        match serde_json::from_str::<AnalysisResult>(candidate) {
            Ok(result) => return AnalysisOutcome::Analyzed(result),
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    candidate_len = candidate.len(),
                    "Analysis candidate rejected"
                );
            }
        }
    }

    tracing::warn!(
        response_len = text.len(),
        "Model response held no parseable analysis, returning degraded result"
    );
    AnalysisOutcome::Degraded(AnalysisResult::degraded(text))
}

fn json_candidates(text: &str) -> impl Iterator<Item = &str> {
    [fenced_block(text), brace_span(text), Some(text)]
        .into_iter()
        .flatten()
}

fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find(JSON_FENCE)? + JSON_FENCE.len();
    let body = &text[start..];
    // An unclosed fence runs to the end of the response.
    let end = body.find(FENCE).unwrap_or(body.len());
    Some(body[..end].trim())
}

fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}
