//! # Configuration
//!
//! Process configuration read from the environment, and the verify command
//! settings read from a YAML file.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Write a default settings file when none exists
//! - 1.0.0: Initial split of env config and command settings

use anyhow::Result;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::features::verification::{ReplyPolicy, ValidationConfig};

const DEFAULT_LINK_TIMEOUT: Duration = Duration::from_secs(15);

const DEFAULT_SETTINGS_YAML: &str = r#"# Slash command used to link a Discord account
command-alias: verify
command-description: Link your Discord account using a verification code
code-option-name: code
code-option-description: The verification code you received in game

# 0 disables the length check
code-minimum-length: 0
# Empty disables the format check. The whole code must match.
code-regex-pattern: ""

# Placeholders: {user}, {code}. Leave empty to show the linking service's own message.
verification-success-message: "Verification successful!"
# Placeholder: {reason}
invalid-code-message: "Invalid code. Reason: {reason}"
ephemeral-reply: true
"#;

/// Process-level configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub discord_guild_id: Option<String>,
    pub log_level: String,
    pub settings_path: String,
    pub link_service_url: String,
    pub link_service_token: Option<String>,
    pub link_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let discord_token = std::env::var("DISCORD_TOKEN")
            .map_err(|_| anyhow::anyhow!("DISCORD_TOKEN environment variable not set"))?;
        let link_service_url = std::env::var("LINK_SERVICE_URL")
            .map_err(|_| anyhow::anyhow!("LINK_SERVICE_URL environment variable not set"))?;

        let link_timeout =
            parse_link_timeout(std::env::var("LINK_TIMEOUT_SECONDS").ok().as_deref())?;

        Ok(Config {
            discord_token,
            discord_guild_id: non_empty_var("DISCORD_GUILD_ID"),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            settings_path: std::env::var("VERIFY_CONFIG_PATH")
                .unwrap_or_else(|_| "config.yml".to_string()),
            link_service_url,
            link_service_token: non_empty_var("LINK_SERVICE_TOKEN"),
            link_timeout,
        })
    }

    /// Guild for development registration; a malformed id falls back to global
    pub fn guild_id(&self) -> Option<u64> {
        let raw = self.discord_guild_id.as_deref()?;
        match raw.trim().parse::<u64>() {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("Ignoring malformed DISCORD_GUILD_ID '{raw}': {e}. Registering commands globally");
                None
            }
        }
    }
}

/// Seconds to wait for the linking service; must be at least 1
fn parse_link_timeout(raw: Option<&str>) -> Result<Duration> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_LINK_TIMEOUT);
    };
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| anyhow::anyhow!("Invalid LINK_TIMEOUT_SECONDS '{raw}': {e}"))?;
    if secs == 0 {
        return Err(anyhow::anyhow!(
            "LINK_TIMEOUT_SECONDS must be at least 1, got 0"
        ));
    }
    Ok(Duration::from_secs(secs))
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Settings for the verify slash command, as stored in the YAML file
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct VerifySettings {
    /// Name the command is registered under
    #[serde(default = "default_alias")]
    pub command_alias: String,

    #[serde(default = "default_command_description")]
    pub command_description: String,

    #[serde(default = "default_option_name")]
    pub code_option_name: String,

    #[serde(default = "default_option_description")]
    pub code_option_description: String,

    /// 0 disables the length check
    #[serde(default)]
    pub code_minimum_length: usize,

    /// Empty disables the format check
    #[serde(default)]
    pub code_regex_pattern: String,

    #[serde(default = "default_success_message")]
    pub verification_success_message: String,

    #[serde(default = "default_invalid_message")]
    pub invalid_code_message: String,

    #[serde(default = "default_true")]
    pub ephemeral_reply: bool,
}

impl VerifySettings {
    /// Load settings from a YAML file
    pub fn load(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read settings file {path}: {e}"))?;
        Self::from_yaml(&contents)
    }

    /// Load settings, writing the default file first if it doesn't exist
    pub fn load_or_create(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            std::fs::write(path, DEFAULT_SETTINGS_YAML)
                .map_err(|e| anyhow::anyhow!("Failed to write default settings to {path}: {e}"))?;
            info!("📄 Wrote default settings to {path}");
        }
        Self::load(path)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let settings: VerifySettings = serde_yaml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check settings against Discord's command limits and compile the pattern
    pub fn validate(&self) -> Result<()> {
        validate_command_name("command-alias", &self.command_alias)?;
        validate_command_name("code-option-name", &self.code_option_name)?;

        if self.command_description.is_empty() || self.command_description.chars().count() > 100 {
            return Err(anyhow::anyhow!(
                "command-description must be 1-100 characters"
            ));
        }
        if self.code_option_description.is_empty()
            || self.code_option_description.chars().count() > 100
        {
            return Err(anyhow::anyhow!(
                "code-option-description must be 1-100 characters"
            ));
        }
        if self.invalid_code_message.is_empty() {
            return Err(anyhow::anyhow!("invalid-code-message must not be empty"));
        }

        self.validation_config()?;
        Ok(())
    }

    /// Build the immutable validation rules for the pipeline
    pub fn validation_config(&self) -> Result<ValidationConfig> {
        ValidationConfig::new(self.code_minimum_length, &self.code_regex_pattern).map_err(|e| {
            anyhow::anyhow!(
                "Invalid code-regex-pattern '{}': {}",
                self.code_regex_pattern,
                e
            )
        })
    }

    /// Build the immutable reply policy for the pipeline
    pub fn reply_policy(&self) -> ReplyPolicy {
        ReplyPolicy {
            success_template: Some(self.verification_success_message.clone())
                .filter(|t| !t.is_empty()),
            invalid_template: self.invalid_code_message.clone(),
            ephemeral: self.ephemeral_reply,
        }
    }
}

impl Default for VerifySettings {
    fn default() -> Self {
        Self {
            command_alias: default_alias(),
            command_description: default_command_description(),
            code_option_name: default_option_name(),
            code_option_description: default_option_description(),
            code_minimum_length: 0,
            code_regex_pattern: String::new(),
            verification_success_message: default_success_message(),
            invalid_code_message: default_invalid_message(),
            ephemeral_reply: true,
        }
    }
}

fn validate_command_name(key: &str, name: &str) -> Result<()> {
    if name.is_empty() || name.chars().count() > 32 {
        return Err(anyhow::anyhow!("{key} must be 1-32 characters: '{name}'"));
    }
    if !name
        .chars()
        .all(|c| c.is_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
    {
        return Err(anyhow::anyhow!("{key} must be lowercase: '{name}'"));
    }
    Ok(())
}

fn default_alias() -> String {
    "verify".to_string()
}

fn default_command_description() -> String {
    "Link your Discord account using a verification code".to_string()
}

fn default_option_name() -> String {
    "code".to_string()
}

fn default_option_description() -> String {
    "The verification code you received".to_string()
}

fn default_success_message() -> String {
    "Verification successful!".to_string()
}

fn default_invalid_message() -> String {
    "Invalid code. Reason: {reason}".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_guild(raw: Option<&str>) -> Config {
        Config {
            discord_token: "token".to_string(),
            discord_guild_id: raw.map(str::to_string),
            log_level: "info".to_string(),
            settings_path: "config.yml".to_string(),
            link_service_url: "http://localhost/link".to_string(),
            link_service_token: None,
            link_timeout: DEFAULT_LINK_TIMEOUT,
        }
    }

    #[test]
    fn test_link_timeout_default() {
        assert_eq!(parse_link_timeout(None).unwrap(), Duration::from_secs(15));
    }

    #[test]
    fn test_link_timeout_parsed() {
        assert_eq!(parse_link_timeout(Some("30")).unwrap(), Duration::from_secs(30));
        assert_eq!(parse_link_timeout(Some(" 5 ")).unwrap(), Duration::from_secs(5));
    }

    #[test]
    fn test_link_timeout_zero_rejected() {
        let err = parse_link_timeout(Some("0")).unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn test_link_timeout_garbage_rejected() {
        assert!(parse_link_timeout(Some("soon")).is_err());
        assert!(parse_link_timeout(Some("-3")).is_err());
    }

    #[test]
    fn test_guild_id_parsed() {
        assert_eq!(config_with_guild(Some("123456789")).guild_id(), Some(123456789));
        assert_eq!(config_with_guild(None).guild_id(), None);
    }

    #[test]
    fn test_malformed_guild_id_is_ignored() {
        assert_eq!(config_with_guild(Some("my-guild")).guild_id(), None);
    }

    #[test]
    fn test_default_yaml_parses() {
        let settings = VerifySettings::from_yaml(DEFAULT_SETTINGS_YAML).unwrap();
        assert_eq!(settings.command_alias, "verify");
        assert_eq!(settings.code_option_name, "code");
        assert_eq!(settings.code_minimum_length, 0);
        assert!(settings.code_regex_pattern.is_empty());
        assert_eq!(settings.verification_success_message, "Verification successful!");
        assert_eq!(settings.invalid_code_message, "Invalid code. Reason: {reason}");
        assert!(settings.ephemeral_reply);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let settings = VerifySettings::from_yaml("command-alias: link\n").unwrap();
        assert_eq!(settings.command_alias, "link");
        assert_eq!(settings.invalid_code_message, "Invalid code. Reason: {reason}");
        assert!(settings.ephemeral_reply);
        assert!(settings.validation_config().unwrap().pattern.is_none());
    }

    #[test]
    fn test_kebab_case_keys() {
        let yaml = r#"
command-alias: verify
code-minimum-length: 6
code-regex-pattern: "^[a-zA-Z0-9]+$"
verification-success-message: "Congrats {user}, verified with {code}!"
ephemeral-reply: false
"#;
        let settings = VerifySettings::from_yaml(yaml).unwrap();
        let rules = settings.validation_config().unwrap();
        assert_eq!(rules.minimum_length, 6);
        assert!(rules.pattern.is_some());

        let policy = settings.reply_policy();
        assert_eq!(
            policy.success_template.as_deref(),
            Some("Congrats {user}, verified with {code}!")
        );
        assert!(!policy.ephemeral);
    }

    #[test]
    fn test_empty_success_message_disables_template() {
        let settings = VerifySettings::from_yaml("verification-success-message: \"\"\n").unwrap();
        assert!(settings.reply_policy().success_template.is_none());
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let result = VerifySettings::from_yaml("code-regex-pattern: \"[invalid\"\n");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Invalid code-regex-pattern"));
    }

    #[test]
    fn test_uppercase_alias_rejected() {
        assert!(VerifySettings::from_yaml("command-alias: Verify\n").is_err());
    }

    #[test]
    fn test_long_alias_rejected() {
        let yaml = format!("command-alias: {}\n", "a".repeat(33));
        assert!(VerifySettings::from_yaml(&yaml).is_err());
    }

    #[test]
    fn test_pattern_is_anchored() {
        let settings = VerifySettings {
            code_regex_pattern: "[0-9]+".to_string(),
            ..VerifySettings::default()
        };
        let re = settings.validation_config().unwrap().pattern.unwrap();
        assert!(re.is_match("12345"));
        assert!(!re.is_match("abc123"));
        assert!(!re.is_match("123abc"));
    }

    #[test]
    fn test_alternation_is_anchored_as_a_whole() {
        let settings = VerifySettings {
            code_regex_pattern: "abc|def".to_string(),
            ..VerifySettings::default()
        };
        let re = settings.validation_config().unwrap().pattern.unwrap();
        assert!(re.is_match("abc"));
        assert!(re.is_match("def"));
        assert!(!re.is_match("abcdef"));
        assert!(!re.is_match("xabc"));
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = std::env::temp_dir().join(format!("slashverify-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.yml");
        let path_str = path.to_str().unwrap();

        let settings = VerifySettings::load_or_create(path_str).unwrap();
        assert!(path.exists());
        assert_eq!(settings.command_alias, "verify");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
