use async_trait::async_trait;
use reqwest::StatusCode;

use crate::domain::errors::{DeliveryError, DomainError, Result};
use crate::domain::ports::Notifier;
use crate::domain::value_objects::TelegramConfig;

/// Longest response body kept in a [`DeliveryError`]
const MAX_ERROR_BODY: usize = 512;

/// Sends notifications through the Telegram Bot API `sendMessage` method
pub struct TelegramNotifier {
    client: reqwest::Client,
    config: TelegramConfig,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| DomainError::HttpClientInit(e.to_string()))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, body: &str) -> std::result::Result<(), DeliveryError> {
        let params = [
            ("chat_id", self.config.chat_id()),
            ("text", body),
            ("parse_mode", "HTML"),
            ("disable_web_page_preview", "false"),
        ];

        // The URL embeds the bot token, so it is stripped from any error
        let response = match self
            .client
            .post(self.config.send_message_url())
            .form(&params)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let error = DeliveryError::Transport(e.without_url().to_string());
                tracing::warn!(error = %error, "Telegram delivery failed");
                return Err(error);
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            let mut text = response.text().await.unwrap_or_default();
            if text.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !text.is_char_boundary(cut) {
                    cut -= 1;
                }
                text.truncate(cut);
            }
            let error = DeliveryError::Rejected {
                status: status.as_u16(),
                body: text,
            };
            tracing::warn!(status = status.as_u16(), error = %error, "Telegram rejected message");
            return Err(error);
        }

        tracing::debug!(chat_id = %self.config.chat_id(), "Telegram message delivered");
        Ok(())
    }
}
