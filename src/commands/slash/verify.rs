//! # Verify Command
//!
//! Link a Discord account with a verification code.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

use crate::core::VerifySettings;

pub fn create_commands(settings: &VerifySettings) -> Vec<CreateApplicationCommand> {
    vec![create_verify_command(settings)]
}

fn create_verify_command(settings: &VerifySettings) -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name(&settings.command_alias)
        .description(&settings.command_description)
        .create_option(|option| {
            // Length and format are checked by the bot so users get the configured reason
            option
                .name(&settings.code_option_name)
                .description(&settings.code_option_description)
                .kind(CommandOptionType::String)
                .required(true)
        });
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_verify_command() {
        let commands = create_commands(&VerifySettings::default());
        assert_eq!(commands.len(), 1);

        let verify = &commands[0];
        let name = verify.0.get("name").unwrap().as_str().unwrap();
        assert_eq!(name, "verify");
    }

    #[test]
    fn test_uses_configured_names() {
        let settings = VerifySettings {
            command_alias: "link".to_string(),
            command_description: "Link your account".to_string(),
            code_option_name: "token".to_string(),
            code_option_description: "Your link token".to_string(),
            ..VerifySettings::default()
        };
        let command = create_verify_command(&settings);

        assert_eq!(command.0.get("name").unwrap().as_str().unwrap(), "link");
        assert_eq!(
            command.0.get("description").unwrap().as_str().unwrap(),
            "Link your account"
        );

        let options = command.0.get("options").unwrap().as_array().unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0]["name"], "token");
        assert_eq!(options[0]["description"], "Your link token");
        assert_eq!(options[0]["required"], true);
    }
}
