use speech_lab::infrastructure::llm::LlmClientFactory;
use speech_lab::presentation::config::LlmSettings;

#[test]
fn given_no_api_key_when_creating_client_then_returns_none() {
    let settings = LlmSettings::default();

    let client = LlmClientFactory::create(&settings).unwrap();

    assert!(client.is_none());
}

#[test]
fn given_blank_api_key_when_creating_client_then_returns_none() {
    let settings = LlmSettings {
        api_key: Some("   ".to_string()),
        ..LlmSettings::default()
    };

    let client = LlmClientFactory::create(&settings).unwrap();

    assert!(client.is_none());
}

#[test]
fn given_api_key_when_creating_client_then_returns_configured_model() {
    let settings = LlmSettings {
        api_key: Some("gem-key".to_string()),
        ..LlmSettings::default()
    };

    let client = LlmClientFactory::create(&settings).unwrap().unwrap();

    assert_eq!(client.model_name(), "gemini-2.0-flash");
}
