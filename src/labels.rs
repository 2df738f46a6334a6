use crate::config::LabelsConfig;
use crate::platform::Localizer;

pub const KEY_TITLE: &str = "cl.Title";
pub const KEY_MESSAGE: &str = "cl.Message";
pub const KEY_STEAM_ID: &str = "cl.SteamID";
pub const KEY_DATE: &str = "cl.Date";
pub const KEY_TEAM_CHAT: &str = "cl.TeamChat";
pub const KEY_GENERAL_CHAT: &str = "cl.GeneralChat";
pub const KEY_SERVER: &str = "cl.Server";

/// Display strings for the notification card, resolved once at load
#[derive(Debug, Clone, PartialEq)]
pub struct Labels {
    pub title: String,
    pub message: String,
    pub steam_id: String,
    pub date: String,
    pub team_chat: String,
    pub general_chat: String,
    pub server: String,
}

impl Labels {
    /// Prefer the host's translations, falling back to the configured labels
    pub fn resolve(localizer: &dyn Localizer, fallback: &LabelsConfig) -> Self {
        let pick = |key: &str, default: &str| {
            localizer
                .localize(key)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            title: pick(KEY_TITLE, &fallback.title),
            message: pick(KEY_MESSAGE, &fallback.message),
            steam_id: pick(KEY_STEAM_ID, &fallback.steam_id),
            date: pick(KEY_DATE, &fallback.date),
            team_chat: pick(KEY_TEAM_CHAT, &fallback.team_chat),
            general_chat: pick(KEY_GENERAL_CHAT, &fallback.general_chat),
            server: pick(KEY_SERVER, &fallback.server),
        }
    }
}

impl From<&LabelsConfig> for Labels {
    fn from(config: &LabelsConfig) -> Self {
        Self {
            title: config.title.clone(),
            message: config.message.clone(),
            steam_id: config.steam_id.clone(),
            date: config.date.clone(),
            team_chat: config.team_chat.clone(),
            general_chat: config.general_chat.clone(),
            server: config.server.clone(),
        }
    }
}
