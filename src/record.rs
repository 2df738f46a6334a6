use chrono::{DateTime, Utc};

/// Server label used when the host has no `hostname` value
pub const UNKNOWN_SERVER: &str = "Unknown";

/// A chat line that passed the filter, ready to be relayed.
///
/// Only built by [`crate::filter::prepare_record`], which guarantees a
/// non-empty message and a resolved player id.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessageRecord {
    pub player_name: String,
    pub message: String,
    /// SteamID64
    pub player_id: u64,
    pub is_team_scoped: bool,
    pub timestamp: DateTime<Utc>,
    pub server_label: String,
}

impl ChatMessageRecord {
    pub fn profile_url(&self) -> String {
        format!("https://steamcommunity.com/id/{}/", self.player_id)
    }

    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
