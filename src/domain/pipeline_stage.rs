use std::fmt;

use super::analysis_outcome::AnalysisOutcome;

/// Stages an upload passes through on its way to a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    Received,
    Stored,
    Transcribed,
    Analyzed,
    AnalysisSkipped,
    AnalysisDegraded,
    AnalysisFailed,
    Completed,
    StorageFailed,
    TranscriptionFailed,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Received => "received",
            PipelineStage::Stored => "stored",
            PipelineStage::Transcribed => "transcribed",
            PipelineStage::Analyzed => "analyzed",
            PipelineStage::AnalysisSkipped => "analysis_skipped",
            PipelineStage::AnalysisDegraded => "analysis_degraded",
            PipelineStage::AnalysisFailed => "analysis_failed",
            PipelineStage::Completed => "completed",
            PipelineStage::StorageFailed => "storage_failed",
            PipelineStage::TranscriptionFailed => "transcription_failed",
        }
    }

    pub fn is_terminal_failure(&self) -> bool {
        matches!(
            self,
            PipelineStage::StorageFailed | PipelineStage::TranscriptionFailed
        )
    }
}

impl From<&AnalysisOutcome> for PipelineStage {
    fn from(outcome: &AnalysisOutcome) -> Self {
        match outcome {
            AnalysisOutcome::Analyzed(_) => PipelineStage::Analyzed,
            AnalysisOutcome::Degraded(_) => PipelineStage::AnalysisDegraded,
            AnalysisOutcome::Failed { .. } => PipelineStage::AnalysisFailed,
            AnalysisOutcome::Skipped => PipelineStage::AnalysisSkipped,
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
