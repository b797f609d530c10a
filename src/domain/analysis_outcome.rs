use serde::Serialize;

use super::analysis::AnalysisResult;

pub const ANALYSIS_FAILED_MARKER: &str = "Analysis failed";

/// How the optional analysis step of a request ended.
///
/// Serializes to the shape clients see in the `analysis` field: the result
/// object for `Analyzed`/`Degraded`, `{"error", "details"}` for `Failed` and
/// `null` for `Skipped`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Analyzed(AnalysisResult),
    Degraded(AnalysisResult),
    Failed { error: String, details: String },
    Skipped,
}

impl AnalysisOutcome {
    pub fn failed(details: impl Into<String>) -> Self {
        Self::Failed {
            error: ANALYSIS_FAILED_MARKER.to_string(),
            details: details.into(),
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Analyzed(result) | Self::Degraded(result) => Some(result),
            Self::Failed { .. } | Self::Skipped => None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }
}
