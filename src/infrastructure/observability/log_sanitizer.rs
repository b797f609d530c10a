const MAX_VISIBLE_CHARS: usize = 100;

const SECRET_PREFIXES: [&str; 6] = [
    "Bearer ",
    "api_key=",
    "key=",
    "password=",
    "secret=",
    "token=",
];

/// Shortens user text (transcripts, prompts) to a single log-friendly line and
/// masks anything that looks like a credential.
pub fn sanitize_for_log(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = collapsed.chars().count();
    let visible = if total_chars > MAX_VISIBLE_CHARS {
        let cut: String = collapsed.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{}... ({} chars total)", cut, total_chars)
    } else {
        collapsed
    };

    SECRET_PREFIXES
        .iter()
        .fold(visible, |acc, prefix| redact_after(&acc, prefix))
}

fn redact_after(text: &str, prefix: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(idx) = rest.find(prefix) {
        let value_start = idx + prefix.len();
        result.push_str(&rest[..value_start]);

        let value_len = rest[value_start..]
            .find(|c: char| c.is_whitespace() || matches!(c, '&' | '"' | '\''))
            .unwrap_or(rest.len() - value_start);

        if value_len > 0 && !rest[value_start..].starts_with("[REDACTED]") {
            result.push_str("[REDACTED]");
            rest = &rest[value_start + value_len..];
        } else {
            rest = &rest[value_start..];
        }
    }

    result.push_str(rest);
    result
}
