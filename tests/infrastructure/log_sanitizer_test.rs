use speech_lab::infrastructure::observability::sanitize_for_log;

#[test]
fn given_blank_text_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_for_log(""), "[EMPTY]");
    assert_eq!(sanitize_for_log(" \n\t "), "[EMPTY]");
}

#[test]
fn given_multiline_transcript_when_sanitizing_then_collapses_to_one_line() {
    assert_eq!(
        sanitize_for_log("  the quick\n brown   fox  "),
        "the quick brown fox"
    );
}

#[test]
fn given_long_text_when_sanitizing_then_truncates_with_total_length() {
    let text = "a".repeat(150);

    let result = sanitize_for_log(&text);

    assert!(result.starts_with(&"a".repeat(100)));
    assert!(result.ends_with("... (150 chars total)"));
}

#[test]
fn given_multibyte_text_when_truncating_then_cuts_on_char_boundary() {
    let text = "é".repeat(120);

    let result = sanitize_for_log(&text);

    assert!(result.starts_with(&"é".repeat(100)));
    assert!(result.contains("(120 chars total)"));
}

#[test]
fn given_bearer_token_when_sanitizing_then_redacts_token() {
    let result = sanitize_for_log("Authorization: Bearer sk-abc123xyz");

    assert_eq!(result, "Authorization: Bearer [REDACTED]");
}

#[test]
fn given_query_style_key_when_sanitizing_then_redacts_every_occurrence() {
    let result = sanitize_for_log("first key=AIza111&second key=AIza222");

    assert!(!result.contains("AIza111"));
    assert!(!result.contains("AIza222"));
    assert_eq!(result, "first key=[REDACTED]&second key=[REDACTED]");
}

#[test]
fn given_api_key_when_sanitizing_then_redacts_once() {
    let result = sanitize_for_log("call with api_key=secret123 now");

    assert_eq!(result, "call with api_key=[REDACTED] now");
}
