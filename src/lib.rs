//! Game-server plugin that relays player chat to a webhook.
//!
//! The host runtime drives [`ChatLogger`]: it calls `load` with an
//! [`EventSource`](platform::EventSource), delivers `say`/`say_team` commands
//! to the registered listeners, and calls `unload` at shutdown.

pub mod config;
pub mod filter;
pub mod labels;
pub mod notifier;
pub mod platform;
pub mod plugin;
pub mod record;

#[cfg(test)]
mod test_support;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use config::Config;
pub use notifier::{NotificationSink, WebhookNotifier};
pub use plugin::ChatLogger;
pub use record::ChatMessageRecord;

/// Install a default log subscriber for hosts that do not provide one.
///
/// Honours `RUST_LOG`. Does nothing if a global subscriber is already set.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,chatlogger=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
