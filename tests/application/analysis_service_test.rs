use std::sync::Arc;

use speech_lab::application::ports::LlmClientError;
use speech_lab::application::services::{AnalysisService, build_analysis_prompt};
use speech_lab::domain::{AnalysisOutcome, AnalysisRequest};

use crate::support::{StubLlmClient, WELL_FORMED_ANALYSIS};

#[test]
fn given_request_when_building_prompt_then_embeds_both_texts_and_schema() {
    let request = AnalysisRequest::new("the quick brown fox", "the quick brown box");

    let prompt = build_analysis_prompt(&request);

    assert!(prompt.contains("Original Text: \"the quick brown fox\""));
    assert!(prompt.contains("Transcribed Text: \"the quick brown box\""));
    assert!(prompt.contains("\"incorrect_words\""));
    assert!(prompt.contains("{\"original\": \"word1\", \"transcribed\": \"word2\"}"));
}

#[tokio::test]
async fn given_identical_texts_and_perfect_answer_when_analyzing_then_reports_full_marks() {
    let llm = Arc::new(StubLlmClient::returning(WELL_FORMED_ANALYSIS));
    let service = AnalysisService::new(llm.clone());

    let outcome = service
        .analyze(&AnalysisRequest::new("hello world", "hello world"))
        .await
        .unwrap();

    let result = outcome.result().unwrap();
    assert_eq!(result.accuracy_score.value(), 100);
    assert!(result.missing_words.is_empty());
    assert!(result.incorrect_words.is_empty());
    assert!(llm.prompts()[0].contains("hello world"));
}

#[tokio::test]
async fn given_prose_answer_when_analyzing_then_returns_degraded_not_error() {
    let llm = Arc::new(StubLlmClient::returning("Nice reading, no JSON today."));
    let service = AnalysisService::new(llm);

    let outcome = service
        .analyze(&AnalysisRequest::new("a", "b"))
        .await
        .unwrap();

    assert!(matches!(outcome, AnalysisOutcome::Degraded(_)));
}

#[tokio::test]
async fn given_failing_model_when_analyzing_then_propagates_client_error() {
    let service = AnalysisService::new(Arc::new(StubLlmClient::failing()));

    let result = service.analyze(&AnalysisRequest::new("a", "b")).await;

    assert!(matches!(result, Err(LlmClientError::ApiRequestFailed(_))));
}
