//! Decides which chat lines get relayed.
//!
//! Everything here is synchronous and side-effect free: it runs on the host's
//! event thread, and the same inputs always give the same decision.

use chrono::{DateTime, Utc};

use crate::config::ChatConfig;
use crate::platform::{ChatChannel, ChatCommand, ConnectionState, PlayerInfo};
use crate::record::{ChatMessageRecord, UNKNOWN_SERVER};

/// Vote command alias that is never relayed, whatever the prefix list says
const RTV_ALIAS: &str = "rtv";

/// True if the sender is a real, fully connected player and the text is not a command
pub fn should_process(
    player: Option<&PlayerInfo>,
    command: &ChatCommand,
    config: &ChatConfig,
) -> bool {
    let Some(player) = player else {
        return false;
    };

    player.is_valid
        && !player.is_bot
        && !player.is_hltv
        && player.connection == ConnectionState::Connected
        && !is_command(command.text.trim(), &config.command_prefixes)
}

pub fn is_command(text: &str, prefixes: &[String]) -> bool {
    prefixes
        .iter()
        .any(|prefix| text.starts_with(prefix.as_str()))
        || text.eq_ignore_ascii_case(RTV_ALIAS)
}

/// Build the record for a chat line, or `None` if the sender has no SteamID
/// or the message is blank.
pub fn prepare_record(
    player: &PlayerInfo,
    command: &ChatCommand,
    server_label: Option<&str>,
    captured_at: DateTime<Utc>,
) -> Option<ChatMessageRecord> {
    let player_id = player.steam_id?;
    let message = command.text.trim();
    if message.is_empty() {
        return None;
    }

    let server_label = server_label
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .unwrap_or(UNKNOWN_SERVER);

    Some(ChatMessageRecord {
        player_name: player.name.clone(),
        message: message.to_string(),
        player_id,
        is_team_scoped: command.channel == ChatChannel::Team,
        timestamp: captured_at,
        server_label: server_label.to_string(),
    })
}

/// Full filter: sender and command checks, then record extraction
pub fn filter_event(
    player: Option<&PlayerInfo>,
    command: &ChatCommand,
    config: &ChatConfig,
    server_label: Option<&str>,
    captured_at: DateTime<Utc>,
) -> Option<ChatMessageRecord> {
    if !should_process(player, command, config) {
        return None;
    }
    prepare_record(player?, command, server_label, captured_at)
}
