//! Reply composition and template substitution

use super::request::VerificationRequest;

/// Shown when the linking service fails without giving any text back
pub const EMPTY_FAILURE_MESSAGE: &str = "Verification failed. Please try again.";

/// How replies are worded and who can see them
#[derive(Debug, Clone)]
pub struct ReplyPolicy {
    /// Success message with `{user}` and `{code}`; `None` shows the service's text
    pub success_template: Option<String>,
    /// Rejection message with `{reason}`
    pub invalid_template: String,
    pub ephemeral: bool,
}

/// Replace each `{name}` placeholder in one pass
///
/// Substituted values are not scanned again, so a display name containing
/// `{code}` stays as typed. Unknown braces are left untouched.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let candidate = &rest[open..];
        match values
            .iter()
            .find(|(name, _)| placeholder_at(candidate, name))
        {
            Some((name, value)) => {
                out.push_str(value);
                rest = &candidate[name.len() + 2..];
            }
            None => {
                out.push('{');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn placeholder_at(text: &str, name: &str) -> bool {
    text.len() >= name.len() + 2
        && text[1..].starts_with(name)
        && text[1 + name.len()..].starts_with('}')
}

/// Build the rejection text for a failed validation
pub fn compose_invalid(reason: &str, policy: &ReplyPolicy) -> String {
    fill_template(&policy.invalid_template, &[("reason", reason)])
}

/// Pick the message shown after the linking service answered
pub fn compose(
    is_success: bool,
    response: Option<&str>,
    request: &VerificationRequest,
    policy: &ReplyPolicy,
) -> String {
    if is_success {
        if let Some(template) = policy.success_template.as_deref().filter(|t| !t.is_empty()) {
            return fill_template(
                template,
                &[
                    ("user", request.display_name.as_str()),
                    ("code", request.code.as_str()),
                ],
            );
        }
    }

    // The service's own text is surfaced verbatim
    match response {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => EMPTY_FAILURE_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(code: &str, name: &str) -> VerificationRequest {
        VerificationRequest::new(code, "123456789", name)
    }

    fn policy(success: Option<&str>) -> ReplyPolicy {
        ReplyPolicy {
            success_template: success.map(str::to_string),
            invalid_template: "Invalid code. Reason: {reason}".to_string(),
            ephemeral: true,
        }
    }

    #[test]
    fn test_fill_template_basic() {
        let out = fill_template("Hi {user}, code {code}", &[("user", "Alice"), ("code", "ABC123")]);
        assert_eq!(out, "Hi Alice, code ABC123");
    }

    #[test]
    fn test_fill_template_leaves_other_braces() {
        let out = fill_template("{user} {unknown} {} { {code", &[("user", "Alice")]);
        assert_eq!(out, "Alice {unknown} {} { {code");
    }

    #[test]
    fn test_fill_template_does_not_rescan_values() {
        let out = fill_template("{user}/{code}", &[("user", "{code}"), ("code", "X")]);
        assert_eq!(out, "{code}/X");
    }

    #[test]
    fn test_fill_template_multibyte() {
        let out = fill_template("✅ {user} ✅", &[("user", "Zoë")]);
        assert_eq!(out, "✅ Zoë ✅");
    }

    #[test]
    fn test_success_with_template() {
        let msg = compose(
            true,
            Some("Linked OK"),
            &request("ABC123", "Alice"),
            &policy(Some("{{user}} linked {code} {literal}")),
        );
        assert_eq!(msg, "{Alice} linked ABC123 {literal}");
    }

    #[test]
    fn test_success_without_template_returns_response() {
        let msg = compose(true, Some("Actual DiscordSRV success!"), &request("VALID456", "Alice"), &policy(None));
        assert_eq!(msg, "Actual DiscordSRV success!");
    }

    #[test]
    fn test_success_with_empty_template_returns_response() {
        let msg = compose(true, Some("Linked OK"), &request("VALID456", "Alice"), &policy(Some("")));
        assert_eq!(msg, "Linked OK");
    }

    #[test]
    fn test_failure_returns_response_verbatim() {
        let msg = compose(
            false,
            Some("DiscordSRV error: Already linked"),
            &request("ANYCODE", "Alice"),
            &policy(Some("Congrats {user}!")),
        );
        assert_eq!(msg, "DiscordSRV error: Already linked");
    }

    #[test]
    fn test_failure_without_response() {
        let msg = compose(false, None, &request("ANYCODE", "Alice"), &policy(None));
        assert_eq!(msg, EMPTY_FAILURE_MESSAGE);
    }

    #[test]
    fn test_failure_with_blank_response() {
        let msg = compose(false, Some(" \n "), &request("ANYCODE", "Alice"), &policy(None));
        assert_eq!(msg, EMPTY_FAILURE_MESSAGE);
    }

    #[test]
    fn test_compose_invalid() {
        let msg = compose_invalid("Code too short (minimum 6 characters).", &policy(None));
        assert_eq!(msg, "Invalid code. Reason: Code too short (minimum 6 characters).");
    }
}
