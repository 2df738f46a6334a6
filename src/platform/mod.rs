pub mod registry;

use std::sync::Arc;

pub use registry::CommandRegistry;

/// Connection state of a player slot, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    NotConnected,
    Connecting,
    Connected,
    Disconnecting,
    Disconnected,
    Reserved,
}

/// Snapshot of the player who issued a chat command
#[derive(Debug, Clone)]
pub struct PlayerInfo {
    /// Display name at the time of the event
    pub name: String,
    /// False once the host has released the underlying entity
    pub is_valid: bool,
    pub is_bot: bool,
    /// Broadcast-only spectator (SourceTV / HLTV)
    pub is_hltv: bool,
    pub connection: ConnectionState,
    /// SteamID64, present only once the player is authorized
    pub steam_id: Option<u64>,
}

/// Chat channel a message was sent through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatChannel {
    General,
    Team,
}

impl ChatChannel {
    /// Map a host command name (`say`, `say_team`) to its channel
    pub fn from_command(command: &str) -> Self {
        if command == "say_team" {
            ChatChannel::Team
        } else {
            ChatChannel::General
        }
    }
}

/// A chat command as delivered by the host
#[derive(Debug, Clone)]
pub struct ChatCommand {
    pub channel: ChatChannel,
    /// Raw argument text of the command
    pub text: String,
}

/// What a listener tells the host to do with the event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookResult {
    Continue,
    Handled,
    Stop,
}

/// Handle returned by [`EventSource::add_command_listener`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

pub type CommandListener =
    Arc<dyn Fn(Option<&PlayerInfo>, &ChatCommand) -> HookResult + Send + Sync>;

/// Source of chat command events, implemented by the host
pub trait EventSource {
    fn add_command_listener(&self, command: &str, listener: CommandListener) -> ListenerId;

    /// Returns false if the listener was not registered
    fn remove_command_listener(&self, id: ListenerId) -> bool;
}

/// Server-side lookups the host exposes to plugins
pub trait ServerContext: Send + Sync {
    /// String value of a console variable, if it exists
    fn find_convar(&self, name: &str) -> Option<String>;
}

/// Host translation table
pub trait Localizer: Send + Sync {
    fn localize(&self, key: &str) -> Option<String>;
}
