//! Per-invocation request and reply values

/// One verify command invocation, built fresh and never mutated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    pub code: String,
    pub user_id: String,
    /// Shown in `{user}`; the user's tag on Discord
    pub display_name: String,
}

impl VerificationRequest {
    pub fn new(
        code: impl Into<String>,
        user_id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            user_id: user_id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Message to send back to the invoking user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub content: String,
    pub ephemeral: bool,
}
