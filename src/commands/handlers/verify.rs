//! Verify command handler
//!
//! Handles: the configured verify alias
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use async_trait::async_trait;
use serenity::http::Http;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash::get_string_option;
use crate::features::verification::{Reply, ReplySink, VerificationRequest};

/// Handler for the account verification command
pub struct VerifyHandler {
    alias: String,
}

impl VerifyHandler {
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
        }
    }
}

#[async_trait]
impl SlashCommandHandler for VerifyHandler {
    fn command_name(&self) -> &str {
        &self.alias
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        // Checked before reading options so a mismatched command gets no reply
        if !ctx.verification.matches_command(&command.data.name) {
            return Ok(());
        }

        let option_name = &ctx.settings.code_option_name;
        let code = get_string_option(&command.data.options, option_name)
            .ok_or_else(|| anyhow::anyhow!("Missing required option '{option_name}'"))?;

        let request =
            VerificationRequest::new(code, command.user.id.to_string(), command.user.tag());
        let sink = InteractionReplySink {
            http: &serenity_ctx.http,
            command,
        };

        ctx.verification
            .dispatch(&command.data.name, &request, &sink)
            .await?;
        Ok(())
    }
}

/// Replies to a slash command interaction
pub struct InteractionReplySink<'a> {
    http: &'a Arc<Http>,
    command: &'a ApplicationCommandInteraction,
}

#[async_trait]
impl<'a> ReplySink for InteractionReplySink<'a> {
    async fn send(&self, reply: Reply) -> Result<()> {
        let Reply { content, ephemeral } = reply;
        self.command
            .create_interaction_response(self.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| {
                        message.content(content).ephemeral(ephemeral)
                    })
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_handler_uses_alias() {
        let handler = VerifyHandler::new("link");
        assert_eq!(handler.command_name(), "link");
    }
}
