//! Downstream sink clients and fan-out.
//!
//! A sink wraps a single outbound HTTP call. Sinks are only constructed when
//! their configuration is present, so an unconfigured sink performs no network
//! activity at all.
//!
//! Delivery is best effort:
//! - every active sink is attempted concurrently, once
//! - each attempt is bounded by the configured timeout
//! - failures (transport, non-success status, timeout) are logged and recorded
//!   in a [`DeliveryResult`], never propagated
//!
//! There is no retry and no backoff.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use futures_util::future::join_all;
use reqwest::header::CONTENT_TYPE;
use secrecy::ExposeSecret;
use serde_json::json;
use url::Url;

use crate::config::RelayConfig;
use crate::errors::SinkError;
use crate::payload::AlertPayload;

#[cfg(test)]
#[path = "sinks_tests.rs"]
mod tests;

/// A downstream destination that receives a copy of every accepted alert.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Short identifier used in logs and delivery results.
    fn name(&self) -> &'static str;

    /// Human-readable destination for logs. Must not contain credentials.
    fn destination(&self) -> String;

    /// Deliver the payload once.
    ///
    /// Returns the HTTP status code of the successful response.
    async fn deliver(&self, payload: &AlertPayload) -> Result<u16, SinkError>;
}

/// Outcome of delivering an alert to one sink.
#[derive(Debug, Clone)]
pub struct DeliveryResult {
    pub sink: &'static str,
    pub destination: String,
    pub success: bool,
    pub status_code: Option<u16>,
    pub response_time_ms: u64,
    pub error_message: Option<String>,
}

/// Forwards the payload verbatim to a generic webhook.
pub struct ForwardSink {
    client: reqwest::Client,
    url: Url,
}

impl ForwardSink {
    pub fn new(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl AlertSink for ForwardSink {
    fn name(&self) -> &'static str {
        "forward"
    }

    fn destination(&self) -> String {
        // Query strings and userinfo often carry credentials.
        let mut url = self.url.clone();
        url.set_query(None);
        url.set_fragment(None);
        let _ = url.set_username("");
        let _ = url.set_password(None);
        url.to_string()
    }

    async fn deliver(&self, payload: &AlertPayload) -> Result<u16, SinkError> {
        let body = serde_json::to_vec(payload)?;

        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| SinkError::Transport(e.without_url()))?;

        check_status(response).await
    }
}

/// Posts a human-readable notification to a Telegram chat.
pub struct NotifySink {
    client: reqwest::Client,
    api_base: String,
    endpoint: String,
    chat_id: String,
}

impl NotifySink {
    /// Create a notify sink.
    ///
    /// `api_base` is the messaging API root without a trailing slash, e.g.
    /// `https://api.telegram.org`.
    pub fn new(
        client: reqwest::Client,
        api_base: &str,
        bot_token: &str,
        chat_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_base: api_base.to_string(),
            endpoint: format!("{}/bot{}/sendMessage", api_base, bot_token),
            chat_id: chat_id.into(),
        }
    }

    /// Render the notification text for a payload.
    pub fn format_message(payload: &AlertPayload) -> String {
        format!(
            "\u{1F4C8} *TV Alert*\n```\n{}\n```",
            payload.to_compact_json()
        )
    }
}

#[async_trait]
impl AlertSink for NotifySink {
    fn name(&self) -> &'static str {
        "notify"
    }

    fn destination(&self) -> String {
        self.api_base.clone()
    }

    async fn deliver(&self, payload: &AlertPayload) -> Result<u16, SinkError> {
        let body = json!({
            "chat_id": self.chat_id,
            "text": Self::format_message(payload),
            "disable_web_page_preview": true,
            "parse_mode": "Markdown",
        });

        // The endpoint embeds the bot token.
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(&body)?)
            .send()
            .await
            .map_err(|e| SinkError::Transport(e.without_url()))?;

        check_status(response).await
    }
}

async fn check_status(response: reqwest::Response) -> Result<u16, SinkError> {
    let status = response.status();
    if status.is_success() {
        return Ok(status.as_u16());
    }

    let body = response.text().await.unwrap_or_default();
    Err(SinkError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Build the HTTP client shared by all sinks.
///
/// # Errors
///
/// Returns `SinkError::Transport` if the TLS backend cannot be initialized.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, SinkError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("tv-webhook-relay/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// The set of active sinks for this process.
pub struct SinkSet {
    sinks: Vec<Arc<dyn AlertSink>>,
    timeout: Duration,
}

impl SinkSet {
    /// Create an empty set whose attempts are bounded by `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self {
            sinks: Vec::new(),
            timeout,
        }
    }

    /// Build the sinks enabled by `config`.
    pub fn from_config(config: &RelayConfig, client: reqwest::Client) -> Self {
        let mut set = Self::new(config.sink_timeout);

        if let Some(url) = &config.forward_url {
            set = set.with_sink(Arc::new(ForwardSink::new(client.clone(), url.clone())));
        }

        if let Some(notify) = &config.notify {
            set = set.with_sink(Arc::new(NotifySink::new(
                client,
                &config.notify_api_base,
                notify.bot_token.expose_secret(),
                notify.chat_id.clone(),
            )));
        }

        set
    }

    /// Add a sink to the set.
    pub fn with_sink(mut self, sink: Arc<dyn AlertSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Names of the active sinks, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }

    /// Deliver the payload to every sink concurrently.
    ///
    /// Each attempt runs in its own task, so a panicking sink is recorded as a
    /// failed delivery and cannot cancel the others. Waits until every attempt
    /// has finished or timed out. Results are returned in registration order.
    pub async fn dispatch(&self, payload: &AlertPayload) -> Vec<DeliveryResult> {
        let payload = Arc::new(payload.clone());
        let attempts = self
            .sinks
            .iter()
            .map(|sink| attempt(Arc::clone(sink), Arc::clone(&payload), self.timeout));
        join_all(attempts).await
    }
}

async fn attempt(
    sink: Arc<dyn AlertSink>,
    payload: Arc<AlertPayload>,
    timeout: Duration,
) -> DeliveryResult {
    let start = Instant::now();
    let task = {
        let sink = Arc::clone(&sink);
        tokio::spawn(async move {
            match tokio::time::timeout(timeout, sink.deliver(&payload)).await {
                Ok(result) => result,
                Err(_) => Err(SinkError::Timeout(timeout)),
            }
        })
    };
    let outcome = match task.await {
        Ok(result) => result,
        Err(join_error) => Err(SinkError::Task(join_error)),
    };
    let response_time_ms = start.elapsed().as_millis() as u64;
    let destination = sink.destination();

    match outcome {
        Ok(status) => {
            tracing::info!(
                sink = sink.name(),
                destination = %destination,
                status,
                elapsed_ms = response_time_ms,
                "Alert delivered"
            );
            DeliveryResult {
                sink: sink.name(),
                destination,
                success: true,
                status_code: Some(status),
                response_time_ms,
                error_message: None,
            }
        }
        Err(err) => {
            tracing::error!(
                sink = sink.name(),
                destination = %destination,
                elapsed_ms = response_time_ms,
                error = %err,
                "Alert delivery failed"
            );
            DeliveryResult {
                sink: sink.name(),
                destination,
                success: false,
                status_code: err.status_code(),
                response_time_ms,
                error_message: Some(err.to_string()),
            }
        }
    }
}
