//! Linking outcome classification
//!
//! The linking service only returns free text, so success is inferred from
//! keywords. This misfires when a success message happens to contain one of
//! them; swap the classifier if the service ever reports a real status.

/// Decides whether a linking service response means the link succeeded
pub trait OutcomeClassifier: Send + Sync {
    fn is_success(&self, response: Option<&str>) -> bool;
}

/// Phrases that mark a response as a failure (matched case-insensitively)
pub const FAILURE_KEYWORDS: &[&str] = &["error", "already linked", "invalid"];

/// Keyword heuristic over the response text
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl OutcomeClassifier for KeywordClassifier {
    fn is_success(&self, response: Option<&str>) -> bool {
        classify(response)
    }
}

/// Success iff there is a non-empty response with no failure keyword in it
pub fn classify(response: Option<&str>) -> bool {
    let Some(text) = response.filter(|t| !t.trim().is_empty()) else {
        return false;
    };
    let lowered = text.to_lowercase();
    !FAILURE_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}
