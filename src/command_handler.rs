use crate::commands::handlers::create_all_handlers;
use crate::commands::{CommandContext, CommandRegistry};
use crate::core::VerifySettings;
use crate::features::linking::AccountLinker;
use crate::features::verification::VerificationService;
use anyhow::Result;
use log::{debug, info};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct CommandHandler {
    context: Arc<CommandContext>,
    registry: CommandRegistry,
}

impl CommandHandler {
    /// Build the handler from validated settings and a linking service
    pub fn new(
        settings: VerifySettings,
        linker: Arc<dyn AccountLinker>,
        link_timeout: Duration,
    ) -> Result<Self> {
        let verification = VerificationService::new(
            settings.command_alias.clone(),
            settings.validation_config()?,
            settings.reply_policy(),
            linker,
        )
        .with_link_timeout(link_timeout);

        let mut registry = CommandRegistry::new();
        for handler in create_all_handlers(&settings) {
            registry.register(handler);
        }

        Ok(CommandHandler {
            context: Arc::new(CommandContext::new(Arc::new(settings), verification)),
            registry,
        })
    }

    pub fn settings(&self) -> &VerifySettings {
        &self.context.settings
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub async fn handle_slash_command(
        &self,
        ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let Some(handler) = self.registry.get(&command.data.name) else {
            debug!("No handler for slash command '{}', ignoring", command.data.name);
            return Ok(());
        };

        info!(
            "📥 Slash command /{} | User: {} | Guild: {}",
            command.data.name,
            command.user.id,
            command
                .guild_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "DM".to_string())
        );

        handler.handle(Arc::clone(&self.context), ctx, command).await
    }
}
