use std::fmt;
use std::time::Duration;

use crate::domain::errors::{DomainError, Result};

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Telegram Bot API settings for the notification channel
#[derive(Clone, PartialEq)]
pub struct TelegramConfig {
    bot_token: String,
    chat_id: String,
    api_base: String,
    timeout: Duration,
}

impl TelegramConfig {
    pub fn new(bot_token: String, chat_id: String) -> Result<Self> {
        if bot_token.trim().is_empty() {
            return Err(DomainError::EmptyBotToken);
        }
        if chat_id.trim().is_empty() {
            return Err(DomainError::EmptyChatId);
        }

        Ok(Self {
            bot_token,
            chat_id,
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Point the client at another Bot API server (self-hosted or local)
    pub fn with_api_base(mut self, api_base: String) -> Result<Self> {
        if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
            return Err(DomainError::InvalidApiBase(api_base));
        }
        self.api_base = api_base.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(DomainError::InvalidTimeout);
        }
        self.timeout = timeout;
        Ok(self)
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full `sendMessage` endpoint. Contains the bot token: never log it.
    pub fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.bot_token)
    }
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}
