use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use super::{
    ChatChannel, ChatCommand, CommandListener, EventSource, HookResult, ListenerId, PlayerInfo,
};

struct Registration {
    id: ListenerId,
    command: String,
    listener: CommandListener,
}

/// In-process [`EventSource`] a host adapter can embed.
///
/// Listeners for a command run in registration order. Dispatch stops at the
/// first listener that returns anything other than [`HookResult::Continue`].
#[derive(Default)]
pub struct CommandRegistry {
    next_id: AtomicU64,
    listeners: Mutex<Vec<Registration>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn listeners(&self) -> MutexGuard<'_, Vec<Registration>> {
        // A panicking listener never runs under this lock, so poison carries no broken state.
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of listeners registered for `command`
    pub fn listener_count(&self, command: &str) -> usize {
        self.listeners()
            .iter()
            .filter(|r| r.command == command)
            .count()
    }

    /// Deliver a chat command to every listener registered for it
    pub fn dispatch(
        &self,
        command: &str,
        player: Option<&PlayerInfo>,
        text: &str,
    ) -> HookResult {
        let targets: Vec<CommandListener> = self
            .listeners()
            .iter()
            .filter(|r| r.command == command)
            .map(|r| r.listener.clone())
            .collect();

        let chat = ChatCommand {
            channel: ChatChannel::from_command(command),
            text: text.to_string(),
        };

        for listener in targets {
            let result = listener(player, &chat);
            if result != HookResult::Continue {
                debug!("Listener for '{}' returned {:?}", command, result);
                return result;
            }
        }

        HookResult::Continue
    }
}

impl EventSource for CommandRegistry {
    fn add_command_listener(&self, command: &str, listener: CommandListener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners().push(Registration {
            id,
            command: command.to_string(),
            listener,
        });
        id
    }

    fn remove_command_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners();
        let before = listeners.len();
        listeners.retain(|r| r.id != id);
        listeners.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn recording(
        log: Arc<Mutex<Vec<String>>>,
        tag: &'static str,
        result: HookResult,
    ) -> CommandListener {
        Arc::new(move |_player: Option<&PlayerInfo>, chat: &ChatCommand| {
            log.lock()
                .unwrap()
                .push(format!("{}:{:?}:{}", tag, chat.channel, chat.text));
            result
        })
    }

    #[test]
    fn test_dispatch_routes_by_command() {
        let registry = CommandRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        registry.add_command_listener("say", recording(log.clone(), "a", HookResult::Continue));
        registry.add_command_listener(
            "say_team",
            recording(log.clone(), "b", HookResult::Continue),
        );

        assert_eq!(registry.dispatch("say_team", None, "hi"), HookResult::Continue);
        assert_eq!(*log.lock().unwrap(), vec!["b:Team:hi"]);
    }

    #[test]
    fn test_dispatch_stops_at_first_non_continue() {
        let registry = CommandRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        registry.add_command_listener("say", recording(log.clone(), "a", HookResult::Handled));
        registry.add_command_listener("say", recording(log.clone(), "b", HookResult::Continue));

        assert_eq!(registry.dispatch("say", None, "x"), HookResult::Handled);
        assert_eq!(*log.lock().unwrap(), vec!["a:General:x"]);
    }

    #[test]
    fn test_remove_listener() {
        let registry = CommandRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let id =
            registry.add_command_listener("say", recording(log.clone(), "a", HookResult::Continue));

        assert_eq!(registry.listener_count("say"), 1);
        assert!(registry.remove_command_listener(id));
        assert!(!registry.remove_command_listener(id));
        assert_eq!(registry.listener_count("say"), 0);

        registry.dispatch("say", None, "x");
        assert!(log.lock().unwrap().is_empty());
    }
}
