use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use futures::FutureExt;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::filter;
use crate::labels::Labels;
use crate::notifier::{NotificationSink, WebhookNotifier};
use crate::platform::{
    ChatCommand, CommandListener, EventSource, HookResult, ListenerId, Localizer, PlayerInfo,
    ServerContext,
};
use crate::record::ChatMessageRecord;

pub const MODULE_NAME: &str = "Chat Logger";
pub const MODULE_AUTHOR: &str = "E!N";
pub const MODULE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Host commands carrying player chat
const CHAT_COMMANDS: [&str; 2] = ["say", "say_team"];

/// Console variable holding the server's display name
const HOSTNAME_CONVAR: &str = "hostname";

/// Per-load state: the listeners' shared handler and its shutdown signal
struct ChatRelay {
    config: Arc<Config>,
    sink: Arc<dyn NotificationSink>,
    server: Arc<dyn ServerContext>,
    runtime: Handle,
    shutdown: watch::Sender<bool>,
}

impl ChatRelay {
    fn on_player_chat(&self, player: Option<&PlayerInfo>, command: &ChatCommand) -> HookResult {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.handle_chat(player, command)));
        if let Err(payload) = outcome {
            error!(
                "Critical error while handling chat command: {}",
                panic_message(&*payload)
            );
        }
        HookResult::Continue
    }

    fn handle_chat(&self, player: Option<&PlayerInfo>, command: &ChatCommand) {
        let hostname = self.server.find_convar(HOSTNAME_CONVAR);
        let Some(record) = filter::filter_event(
            player,
            command,
            &self.config.chat,
            hostname.as_deref(),
            Utc::now(),
        ) else {
            return;
        };

        self.dispatch(record);
    }

    /// Hand the record to a background task and return immediately
    fn dispatch(&self, record: ChatMessageRecord) {
        let sink = self.sink.clone();
        let mut shutdown = self.shutdown.subscribe();

        self.runtime.spawn(async move {
            let delivery = AssertUnwindSafe(sink.deliver(&record)).catch_unwind();

            tokio::select! {
                outcome = delivery => match outcome {
                    Ok(Ok(())) => debug!("Relayed chat message from {}", record.player_name),
                    Ok(Err(e)) => error!(
                        "Failed to relay chat message from {}: {:#}",
                        record.player_name, e
                    ),
                    Err(payload) => error!(
                        "Chat relay task for {} panicked: {}",
                        record.player_name,
                        panic_message(&*payload)
                    ),
                },
                _ = cancelled(&mut shutdown) => {
                    debug!("Chat relay for {} cancelled by shutdown", record.player_name);
                }
            }
        });
    }
}

/// Resolves once shutdown is signalled or the relay that owns the signal is gone
async fn cancelled(shutdown: &mut watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stopped| *stopped).await;
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

struct Session {
    relay: Arc<ChatRelay>,
    listeners: Vec<ListenerId>,
}

/// Relays player chat to a webhook.
///
/// The host calls [`ChatLogger::load`] at startup and [`ChatLogger::unload`]
/// at shutdown. Between the two, every `say`/`say_team` command is filtered
/// on the host thread and qualifying messages are delivered in the background.
pub struct ChatLogger {
    config: Arc<Config>,
    sink: Arc<dyn NotificationSink>,
    server: Arc<dyn ServerContext>,
    runtime: Handle,
    session: Option<Session>,
}

impl ChatLogger {
    pub fn new(
        config: Config,
        server: Arc<dyn ServerContext>,
        localizer: &dyn Localizer,
        runtime: Handle,
    ) -> Result<Self> {
        let labels = Labels::resolve(localizer, &config.labels);
        let notifier = WebhookNotifier::new(&config.webhook, labels)?;
        if !notifier.is_enabled() {
            debug!("No webhook URL configured, chat messages will not be relayed");
        }

        Ok(Self::with_sink(
            Arc::new(config),
            Arc::new(notifier),
            server,
            runtime,
        ))
    }

    /// Build with a custom delivery target instead of the webhook notifier
    pub fn with_sink(
        config: Arc<Config>,
        sink: Arc<dyn NotificationSink>,
        server: Arc<dyn ServerContext>,
        runtime: Handle,
    ) -> Self {
        Self {
            config,
            sink,
            server,
            runtime,
            session: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.session.is_some()
    }

    pub fn load(&mut self, source: &dyn EventSource, hot_reload: bool) {
        if self.session.is_some() {
            warn!("{} is already loaded, ignoring load request", MODULE_NAME);
            return;
        }

        let (shutdown, _) = watch::channel(false);
        let relay = Arc::new(ChatRelay {
            config: self.config.clone(),
            sink: self.sink.clone(),
            server: self.server.clone(),
            runtime: self.runtime.clone(),
            shutdown,
        });

        let listeners = CHAT_COMMANDS
            .iter()
            .map(|command| {
                let relay = relay.clone();
                let listener: CommandListener =
                    Arc::new(move |player: Option<&PlayerInfo>, chat: &ChatCommand| {
                        relay.on_player_chat(player, chat)
                    });
                source.add_command_listener(command, listener)
            })
            .collect();

        self.session = Some(Session { relay, listeners });

        info!(
            "{} {} by {} loaded (hot reload: {})",
            MODULE_NAME, MODULE_VERSION, MODULE_AUTHOR, hot_reload
        );
    }

    /// Cancel in-flight deliveries and remove the chat listeners
    pub fn unload(&mut self, source: &dyn EventSource, hot_reload: bool) {
        let Some(session) = self.session.take() else {
            return;
        };

        session.relay.shutdown.send_replace(true);

        for id in session.listeners {
            if !source.remove_command_listener(id) {
                warn!("Chat listener {:?} was already removed", id);
            }
        }

        info!("{} unloaded (hot reload: {})", MODULE_NAME, hot_reload);
    }

    /// Handle one chat command directly. Always returns [`HookResult::Continue`].
    pub fn on_player_chat(
        &self,
        player: Option<&PlayerInfo>,
        command: &ChatCommand,
    ) -> HookResult {
        match &self.session {
            Some(session) => session.relay.on_player_chat(player, command),
            None => HookResult::Continue,
        }
    }
}
