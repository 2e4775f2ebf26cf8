//! Shared context for command handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use std::sync::Arc;

use crate::core::VerifySettings;
use crate::features::verification::VerificationService;

/// Read-only state shared by every command invocation
#[derive(Clone)]
pub struct CommandContext {
    pub settings: Arc<VerifySettings>,
    pub verification: VerificationService,
}

impl CommandContext {
    pub fn new(settings: Arc<VerifySettings>, verification: VerificationService) -> Self {
        Self {
            settings,
            verification,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_context_clone() {
        // CommandContext should be Clone for sharing across handlers
        fn assert_clone<T: Clone>() {}
        assert_clone::<CommandContext>();
    }
}
