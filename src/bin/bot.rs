use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};
use serenity::async_trait;
use serenity::model::application::interaction::{Interaction, InteractionResponseType};
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use std::sync::Arc;

use slashverify::commands::{register_global_commands, register_guild_commands, CommandHandler};
use slashverify::core::{Config, VerifySettings};
use slashverify::features::get_bot_version;
use slashverify::features::linking::HttpAccountLinker;

struct Handler {
    command_handler: Arc<CommandHandler>,
    guild_id: Option<GuildId>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);

        let settings = self.command_handler.settings();

        // Register slash commands - use guild commands for development (instant), global for production
        if let Some(guild_id) = self.guild_id {
            info!("🔧 Development mode: Registering commands for guild {guild_id}");
            if let Err(e) = register_guild_commands(&ctx, guild_id, settings).await {
                error!("❌ Failed to register guild slash commands: {e}");
            } else {
                info!("✅ Successfully registered slash commands for guild {guild_id} (instant update)");
            }
        } else {
            info!("🌍 Production mode: Registering commands globally");
            if let Err(e) = register_global_commands(&ctx, settings).await {
                error!("❌ Failed to register global slash commands: {e}");
            } else {
                info!("✅ Successfully registered slash commands globally (may take up to 1 hour to propagate)");
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::ApplicationCommand(command) => {
                if let Err(e) = self
                    .command_handler
                    .handle_slash_command(&ctx, &command)
                    .await
                {
                    error!(
                        "Error handling slash command '{}': {}",
                        command.data.name, e
                    );

                    let ephemeral = self.command_handler.settings().ephemeral_reply;
                    let error_message =
                        "❌ Sorry, I encountered an error processing your command. Please try again.";

                    // Reply may already have been sent; a second response fails and is only logged
                    if let Err(why) = command
                        .create_interaction_response(&ctx.http, |response| {
                            response
                                .kind(InteractionResponseType::ChannelMessageWithSource)
                                .interaction_response_data(|message| {
                                    message.content(error_message).ephemeral(ephemeral)
                                })
                        })
                        .await
                    {
                        error!("Failed to send error message: {why}");
                    }
                }
            }
            Interaction::Ping(_) => {
                info!("Ping interaction received - Discord health check");
            }
            _ => {}
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting SlashVerify bot v{}...", get_bot_version());

    let settings = VerifySettings::load_or_create(&config.settings_path)?;
    info!(
        "📄 Loaded settings from {} (/{}, minimum length: {}, pattern: {})",
        config.settings_path,
        settings.command_alias,
        settings.code_minimum_length,
        if settings.code_regex_pattern.is_empty() {
            "disabled"
        } else {
            settings.code_regex_pattern.as_str()
        }
    );

    let linker = HttpAccountLinker::new(
        config.link_service_url.clone(),
        config.link_service_token.clone(),
    );
    info!(
        "🔗 Linking service: {} (timeout: {}s)",
        linker.endpoint(),
        config.link_timeout.as_secs()
    );

    let command_handler = CommandHandler::new(settings, Arc::new(linker), config.link_timeout)?;

    // Parse guild ID if provided for development mode
    let guild_id = config.guild_id().map(GuildId);

    let handler = Handler {
        command_handler: Arc::new(command_handler),
        guild_id,
    };

    let intents = GatewayIntents::GUILDS;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");

    if let Err(why) = client.start().await {
        error!("Client error: {why:?}");
        return Err(anyhow::anyhow!("Client error: {}", why));
    }

    Ok(())
}
