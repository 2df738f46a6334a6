use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::config::WebhookConfig;
use crate::labels::Labels;
use crate::record::ChatMessageRecord;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WebhookPayload {
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Embed {
    pub title: String,
    pub color: u32,
    pub description: String,
    pub fields: Vec<EmbedField>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    fn block(name: String, value: String) -> Self {
        Self {
            name,
            value,
            inline: false,
        }
    }
}

/// Destination for relayed chat messages
#[async_trait]
pub trait NotificationSink: Send + Sync + 'static {
    async fn deliver(&self, record: &ChatMessageRecord) -> Result<()>;
}

/// Posts chat messages to a webhook as a single embed card
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: Option<String>,
    color: u32,
    labels: Labels,
}

impl WebhookNotifier {
    pub fn new(config: &WebhookConfig, labels: Labels) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build webhook HTTP client")?;

        Ok(Self {
            client,
            url: config.url().map(str::to_string),
            color: config.color,
            labels,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.url.is_some()
    }

    pub fn build_payload(&self, record: &ChatMessageRecord) -> WebhookPayload {
        let labels = &self.labels;
        let scope = if record.is_team_scoped {
            &labels.team_chat
        } else {
            &labels.general_chat
        };

        let fields = vec![
            EmbedField::block(
                format!("{} ({})", labels.message, scope),
                record.message.clone(),
            ),
            EmbedField::block(labels.steam_id.clone(), record.profile_url()),
            EmbedField::block(labels.date.clone(), record.formatted_timestamp()),
        ];

        WebhookPayload {
            embeds: vec![Embed {
                title: format!("{} {}", labels.title, record.player_name),
                color: self.color,
                description: format!("{}: {}", labels.server, record.server_label),
                fields,
            }],
        }
    }
}

#[async_trait]
impl NotificationSink for WebhookNotifier {
    async fn deliver(&self, record: &ChatMessageRecord) -> Result<()> {
        let Some(url) = self.url.as_deref() else {
            return Ok(());
        };

        let payload = self.build_payload(record);

        debug!("Posting chat message from {} to webhook", record.player_name);

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .context("Failed to send webhook request")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Webhook error ({}): {}", status, error_body);
        }

        Ok(())
    }
}
