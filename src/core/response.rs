//! Discord message limit helpers
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;

/// Truncate text to fit the message limit, adding ellipsis if needed
pub fn truncate_for_message(text: &str) -> String {
    if text.len() <= MESSAGE_LIMIT {
        text.to_string()
    } else {
        // Find a safe UTF-8 boundary
        let mut end = MESSAGE_LIMIT - 3; // Room for "..."
        while !text.is_char_boundary(end) && end > 0 {
            end -= 1;
        }
        format!("{}...", &text[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short() {
        let text = "Verification successful!";
        assert_eq!(truncate_for_message(text), text);
    }

    #[test]
    fn test_truncate_long() {
        let text = "a".repeat(3000);
        let result = truncate_for_message(&text);
        assert!(result.len() <= MESSAGE_LIMIT);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_exactly_at_limit() {
        let text = "a".repeat(MESSAGE_LIMIT);
        assert_eq!(truncate_for_message(&text), text);
    }

    #[test]
    fn test_utf8_safety() {
        let text = "世界".repeat(1000);
        let result = truncate_for_message(&text);
        assert!(result.len() <= MESSAGE_LIMIT);
        assert!(result.ends_with("..."));
    }
}
