//! Sanitizing and truncating diagnostic messages.

/// Removes control characters except tab, newline and carriage return.
pub fn sanitize_message(message: &str) -> String {
    message
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

/// Sanitizes `message` and caps it at `max_chars` characters.
pub fn truncate_message(message: &str, max_chars: usize) -> String {
    let sanitized = sanitize_message(message);
    let total = sanitized.chars().count();
    if total <= max_chars {
        return sanitized;
    }
    let kept: String = sanitized.chars().take(max_chars).collect();
    format!("{kept}... (truncated, original length: {total} chars)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_message_removes_control_chars() {
        assert_eq!(sanitize_message("bad\x00json\x07 here\n"), "badjson here\n");
    }

    #[test]
    fn test_truncate_message() {
        assert_eq!(truncate_message("short", 10), "short");
        let out = truncate_message(&"x".repeat(30), 10);
        assert!(out.starts_with("xxxxxxxxxx..."));
        assert!(out.ends_with("original length: 30 chars)"));
    }
}
