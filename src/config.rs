use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub labels: LabelsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WebhookConfig {
    /// Webhook endpoint. Empty or missing disables delivery.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_embed_color")]
    pub color: u32,
}

impl WebhookConfig {
    /// Returns the configured URL, treating a blank value as unset.
    pub fn url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: default_timeout_secs(),
            color: default_embed_color(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    /// Messages starting with any of these are treated as commands and never relayed.
    #[serde(default = "default_command_prefixes")]
    pub command_prefixes: Vec<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            command_prefixes: default_command_prefixes(),
        }
    }
}

/// Fallback display labels, used when the host has no translation for a key.
#[derive(Debug, Deserialize, Clone)]
pub struct LabelsConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_message")]
    pub message: String,
    #[serde(default = "default_steam_id")]
    pub steam_id: String,
    #[serde(default = "default_date")]
    pub date: String,
    #[serde(default = "default_team_chat")]
    pub team_chat: String,
    #[serde(default = "default_general_chat")]
    pub general_chat: String,
    #[serde(default = "default_server")]
    pub server: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            message: default_message(),
            steam_id: default_steam_id(),
            date: default_date(),
            team_chat: default_team_chat(),
            general_chat: default_general_chat(),
            server: default_server(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_embed_color() -> u32 {
    2826045
}

fn default_command_prefixes() -> Vec<String> {
    ["!", "@", "/", "."].iter().map(|p| p.to_string()).collect()
}

fn default_title() -> String {
    "New message from".to_string()
}

fn default_message() -> String {
    "Message".to_string()
}

fn default_steam_id() -> String {
    "Steam profile".to_string()
}

fn default_date() -> String {
    "Date".to_string()
}

fn default_team_chat() -> String {
    "Team chat".to_string()
}

fn default_general_chat() -> String {
    "General chat".to_string()
}

fn default_server() -> String {
    "Server".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Invalid config TOML")?;

        if config.webhook.timeout_secs == 0 {
            anyhow::bail!("webhook.timeout_secs must be greater than zero");
        }

        Ok(config)
    }
}
