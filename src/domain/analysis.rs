use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

pub const UNPARSEABLE_ANALYSIS_NOTE: &str = "Unable to parse detailed analysis";

/// The reference text a speaker read aloud, and what the transcriber heard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnalysisRequest {
    pub original_text: String,
    pub transcribed_text: String,
}

impl AnalysisRequest {
    pub fn new(original_text: impl Into<String>, transcribed_text: impl Into<String>) -> Self {
        Self {
            original_text: original_text.into(),
            transcribed_text: transcribed_text.into(),
        }
    }
}

/// Structured verdict returned by the generative model.
///
/// `strengths` and `areas_for_improvement` may be omitted by the model; every
/// other field is required, so a payload either deserializes completely or
/// not at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub accuracy_score: Score,
    pub fluency_score: Score,
    pub overall_score: Score,
    pub word_accuracy: Score,
    pub missing_words: Vec<String>,
    pub incorrect_words: Vec<IncorrectWord>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub areas_for_improvement: Vec<String>,
    pub detailed_feedback: String,
}

impl AnalysisResult {
    /// Zeroed result carrying the raw model output as feedback.
    pub fn degraded(raw_response: impl Into<String>) -> Self {
        Self {
            accuracy_score: Score::ZERO,
            fluency_score: Score::ZERO,
            overall_score: Score::ZERO,
            word_accuracy: Score::ZERO,
            missing_words: Vec::new(),
            incorrect_words: Vec::new(),
            strengths: Vec::new(),
            areas_for_improvement: vec![UNPARSEABLE_ANALYSIS_NOTE.to_string()],
            detailed_feedback: raw_response.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncorrectWord {
    pub original: String,
    pub transcribed: String,
}

/// Integer score in `0..=100`.
///
/// Accepts integers, floats (rounded) and numeric strings such as `"85%"`;
/// out-of-range values are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    pub const ZERO: Score = Score(0);
    pub const MAX: Score = Score(100);

    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.round().clamp(0.0, f64::from(Self::MAX.0)) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawScore {
            Number(f64),
            Text(String),
        }

        match RawScore::deserialize(deserializer)? {
            RawScore::Number(n) => Ok(Score::new(n)),
            RawScore::Text(s) => s
                .trim()
                .trim_end_matches('%')
                .trim()
                .parse::<f64>()
                .map(Score::new)
                .map_err(|_| de::Error::custom(format!("invalid score: {}", s))),
        }
    }
}
