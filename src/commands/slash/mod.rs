//! # Slash Commands (/)
//!
//! Discord native slash command definitions and registration.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

mod verify;

use anyhow::Result;
use log::info;
use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::Command;
use serenity::model::application::interaction::application_command::CommandDataOption;
use serenity::model::id::GuildId;
use serenity::prelude::Context;

use crate::core::VerifySettings;

/// Creates all slash command definitions
pub fn create_slash_commands(settings: &VerifySettings) -> Vec<CreateApplicationCommand> {
    verify::create_commands(settings)
}

/// Registers all slash commands globally
pub async fn register_global_commands(ctx: &Context, settings: &VerifySettings) -> Result<()> {
    let slash_commands = create_slash_commands(settings);
    let count = slash_commands.len();

    Command::set_global_application_commands(&ctx.http, |commands| {
        for command in slash_commands {
            commands.add_application_command(command);
        }
        commands
    })
    .await?;

    info!(
        "Global slash commands registered successfully ({count} commands, /{})",
        settings.command_alias
    );
    Ok(())
}

/// Registers all slash commands for a specific guild (faster for testing)
pub async fn register_guild_commands(
    ctx: &Context,
    guild_id: GuildId,
    settings: &VerifySettings,
) -> Result<()> {
    let slash_commands = create_slash_commands(settings);
    let count = slash_commands.len();

    guild_id
        .set_application_commands(&ctx.http, |commands| {
            for command in slash_commands {
                commands.add_application_command(command);
            }
            commands
        })
        .await?;

    info!(
        "Guild slash commands registered for guild {guild_id} ({count} commands, /{})",
        settings.command_alias
    );
    Ok(())
}

/// Utility function to get string option from slash command
pub fn get_string_option(options: &[CommandDataOption], name: &str) -> Option<String> {
    options
        .iter()
        .find(|opt| opt.name == name)
        .and_then(|opt| opt.value.as_ref())
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}
