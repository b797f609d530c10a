mod analysis_prompt;
mod analysis_service;
mod response_parser;
mod speech_pipeline;

pub use analysis_prompt::build_analysis_prompt;
pub use analysis_service::AnalysisService;
pub use response_parser::{extract_json_candidate, parse_analysis};
pub use speech_pipeline::{Capabilities, PipelineError, SpeechPipeline};
