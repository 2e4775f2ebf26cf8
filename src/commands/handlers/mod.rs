//! Per-command handler implementations
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

pub mod verify;

use std::sync::Arc;

use super::handler::SlashCommandHandler;
use crate::core::VerifySettings;

/// Create all registered command handlers
///
/// Returns a vector of handlers ready to be registered with CommandRegistry.
pub fn create_all_handlers(settings: &VerifySettings) -> Vec<Arc<dyn SlashCommandHandler>> {
    vec![Arc::new(verify::VerifyHandler::new(
        settings.command_alias.clone(),
    ))]
}
