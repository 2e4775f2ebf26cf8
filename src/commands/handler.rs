//! Slash command handler trait
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Command names come from settings at runtime
//! - 1.0.0: Initial implementation for modular command handling

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

use super::context::CommandContext;

/// Trait for slash command handlers
///
/// Handlers are registered with a CommandRegistry and dispatched based on
/// command name. The name is only known once settings are loaded, so it is
/// returned by value rather than as a static.
#[async_trait]
pub trait SlashCommandHandler: Send + Sync {
    /// Name this handler is registered under
    fn command_name(&self) -> &str;

    /// Handle the slash command
    ///
    /// # Arguments
    ///
    /// * `ctx` - Shared command context with settings and the verification service
    /// * `serenity_ctx` - Serenity context for Discord API calls
    /// * `command` - The slash command interaction to handle
    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()>;
}
