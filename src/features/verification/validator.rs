//! Code validation
//!
//! Syntactic checks run on a submitted code before the linking service is
//! contacted. The length check always runs before the format check.

use regex::Regex;

/// Validation rules, fixed once loaded and shared across requests
#[derive(Debug, Clone, Default)]
pub struct ValidationConfig {
    /// Minimum code length in characters; 0 disables the check
    pub minimum_length: usize,
    /// Anchored full-match pattern; `None` disables the check
    pub pattern: Option<Regex>,
}

impl ValidationConfig {
    /// Build rules from raw settings; an empty pattern disables the format check
    ///
    /// The pattern is wrapped so it must match the whole code.
    pub fn new(minimum_length: usize, pattern: &str) -> Result<Self, regex::Error> {
        let pattern = if pattern.is_empty() {
            None
        } else {
            Some(Regex::new(&format!("^(?:{pattern})$"))?)
        };
        Ok(Self {
            minimum_length,
            pattern,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid { reason: String },
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }
}

/// Check a code against the configured rules
pub fn validate(code: &str, config: &ValidationConfig) -> ValidationOutcome {
    if config.minimum_length > 0 && code.chars().count() < config.minimum_length {
        return ValidationOutcome::Invalid {
            reason: format!(
                "Code too short (minimum {} characters).",
                config.minimum_length
            ),
        };
    }

    if let Some(ref pattern) = config.pattern {
        if !is_full_match(pattern, code) {
            return ValidationOutcome::Invalid {
                reason: "Code does not match the required format.".to_string(),
            };
        }
    }

    ValidationOutcome::Valid
}

// Covers patterns built without `ValidationConfig::new`
fn is_full_match(pattern: &Regex, code: &str) -> bool {
    pattern
        .find(code)
        .map(|m| m.start() == 0 && m.end() == code.len())
        .unwrap_or(false)
}
