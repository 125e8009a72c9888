//! Process configuration for the alert relay.
//!
//! The configuration is read from the environment exactly once at startup and
//! is never mutated afterwards. Request handling code receives it by reference
//! and never consults the environment itself.
//!
//! ## Environment Variables
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `HOST` | Address to bind to | `0.0.0.0` |
//! | `PORT` | Port to listen on | `8080` |
//! | `TV_WEBHOOK_SECRET` | Secret expected in `/tv/{secret}` | empty, intake disabled |
//! | `FORWARD_WEBHOOK` | URL the payload is forwarded to | unset, forwarding disabled |
//! | `TELEGRAM_BOT_TOKEN` | Bot token for notifications | unset |
//! | `TELEGRAM_CHAT_ID` | Chat receiving notifications | unset |
//! | `TELEGRAM_API_BASE` | Messaging API base URL | `https://api.telegram.org` |
//! | `SINK_TIMEOUT_SECS` | Per-sink delivery timeout | `5` |
//!
//! Every value is trimmed. A value that is empty after trimming counts as unset.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::errors::ConfigError;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default base URL of the messaging API used by the notify sink.
pub const DEFAULT_NOTIFY_API_BASE: &str = "https://api.telegram.org";

/// Default time allowed for a single sink delivery attempt.
pub const DEFAULT_SINK_TIMEOUT: Duration = Duration::from_secs(5);

/// Credentials for the notify sink. Only constructed when both parts are present.
#[derive(Debug)]
pub struct NotifyCredentials {
    /// Bot token, embedded in the messaging API path
    pub bot_token: SecretString,

    /// Chat the notification is posted to
    pub chat_id: String,
}

/// Immutable relay configuration.
#[derive(Debug)]
pub struct RelayConfig {
    /// Address to bind to
    pub host: IpAddr,

    /// Port to listen on
    pub port: u16,

    /// Secret expected as the last path segment of the intake URL
    pub secret: SecretString,

    /// Destination of the forward sink
    pub forward_url: Option<Url>,

    /// Credentials of the notify sink
    pub notify: Option<NotifyCredentials>,

    /// Base URL of the messaging API, without a trailing slash
    pub notify_api_base: String,

    /// Time allowed for a single sink delivery attempt
    pub sink_timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            secret: SecretString::from(String::new()),
            forward_url: None,
            notify: None,
            notify_api_base: DEFAULT_NOTIFY_API_BASE.to_string(),
            sink_timeout: DEFAULT_SINK_TIMEOUT,
        }
    }
}

impl RelayConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a variable is present but cannot be
    /// parsed (for example a non-numeric `PORT` or a malformed `FORWARD_WEBHOOK`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// `lookup` returns the raw value of a variable, or `None` when unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();

        if let Some(host) = read("HOST") {
            config.host = host.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidValue {
                    name: "HOST",
                    value: host.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        if let Some(port) = read("PORT") {
            config.port = port.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    name: "PORT",
                    value: port.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        if let Some(secret) = read("TV_WEBHOOK_SECRET") {
            config.secret = SecretString::from(secret);
        }

        if let Some(forward) = read("FORWARD_WEBHOOK") {
            config.forward_url = Some(parse_url("FORWARD_WEBHOOK", &forward)?);
        }

        if let (Some(bot_token), Some(chat_id)) =
            (read("TELEGRAM_BOT_TOKEN"), read("TELEGRAM_CHAT_ID"))
        {
            config.notify = Some(NotifyCredentials {
                bot_token: SecretString::from(bot_token),
                chat_id,
            });
        }

        if let Some(base) = read("TELEGRAM_API_BASE") {
            parse_url("TELEGRAM_API_BASE", &base)?;
            config.notify_api_base = base.trim_end_matches('/').to_string();
        }

        if let Some(secs) = read("SINK_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    name: "SINK_TIMEOUT_SECS",
                    value: secs.clone(),
                    reason: e.to_string(),
                }
            })?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    name: "SINK_TIMEOUT_SECS",
                    value: "0".to_string(),
                    reason: "timeout must be at least one second".to_string(),
                });
            }
            config.sink_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Set the intake secret.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = SecretString::from(secret.into());
        self
    }

    /// Enable the forward sink.
    pub fn with_forward_url(mut self, url: Url) -> Self {
        self.forward_url = Some(url);
        self
    }

    /// Enable the notify sink.
    pub fn with_notify(mut self, bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        self.notify = Some(NotifyCredentials {
            bot_token: SecretString::from(bot_token.into()),
            chat_id: chat_id.into(),
        });
        self
    }

    /// Point the notify sink at a different messaging API host.
    pub fn with_notify_api_base(mut self, base: impl Into<String>) -> Self {
        self.notify_api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    /// Change the per-sink delivery timeout.
    pub fn with_sink_timeout(mut self, timeout: Duration) -> Self {
        self.sink_timeout = timeout;
        self
    }

    /// Whether intake is possible at all.
    pub fn intake_enabled(&self) -> bool {
        !self.secret.expose_secret().is_empty()
    }

    /// Check a secret candidate taken from the request path.
    ///
    /// Always `false` while no secret is configured.
    pub fn accepts_secret(&self, candidate: &str) -> bool {
        self.intake_enabled() && self.secret.expose_secret() == candidate
    }
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
