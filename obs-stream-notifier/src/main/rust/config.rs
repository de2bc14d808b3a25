use std::time::Duration;

use clap::Parser;

use crate::domain::value_objects::{ObsConfig, ReconnectPolicy, StreamerProfile, TelegramConfig};

#[derive(Parser, Clone)]
#[command(
    name = "obs-stream-notifier",
    version = "0.1.0",
    about = "Announces OBS stream start/stop in a Telegram chat"
)]
pub struct Config {
    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub telegram_bot_token: String,

    /// Telegram chat, group or channel id to notify
    #[arg(long, env = "TELEGRAM_CHAT_ID", allow_hyphen_values = true)]
    pub telegram_chat_id: String,

    /// Telegram Bot API base URL
    #[arg(long, env = "TELEGRAM_API_BASE", default_value = "https://api.telegram.org")]
    pub telegram_api_base: String,

    /// OBS WebSocket host
    #[arg(long, env = "OBS_HOST", default_value = "localhost")]
    pub obs_host: String,

    /// OBS WebSocket port
    #[arg(long, env = "OBS_PORT", default_value = "4455")]
    pub obs_port: u16,

    /// OBS WebSocket password (empty when authentication is disabled)
    #[arg(long, env = "OBS_PASSWORD", default_value = "", hide_env_values = true)]
    pub obs_password: String,

    /// Streamer name shown in the notification and used in the watch URL
    #[arg(long, env = "STREAMERS_NAME")]
    pub streamer_name: String,

    /// Streaming platform label
    #[arg(long, env = "STREAM_PLATFORM_NAME", default_value = "Twitch")]
    pub platform_name: String,

    /// Streaming platform base URL
    #[arg(long, env = "STREAM_PLATFORM_URL", default_value = "https://www.twitch.tv")]
    pub platform_url: String,

    /// Keepalive interval for the OBS connection in seconds
    #[arg(long, env = "CHECK_INTERVAL_SECONDS", default_value = "30")]
    pub check_interval_seconds: u64,

    /// Delay between reconnection attempts in seconds
    #[arg(long, env = "RECONNECT_DELAY_SECONDS", default_value = "5")]
    pub reconnect_delay_seconds: u64,

    /// Metrics server port
    #[arg(long, env = "METRICS_PORT", default_value = "9003")]
    pub metrics_port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Minimum allowed port (ports below 1024 are privileged)
const MIN_USER_PORT: u16 = 1024;

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.telegram_bot_token.trim().is_empty() {
            anyhow::bail!("TELEGRAM_BOT_TOKEN must not be empty");
        }

        if self.telegram_chat_id.trim().is_empty() {
            anyhow::bail!("TELEGRAM_CHAT_ID must not be empty");
        }

        if self.obs_port == 0 {
            anyhow::bail!("Invalid OBS port: port cannot be 0");
        }

        Self::validate_port(self.metrics_port, "metrics")?;

        if self.check_interval_seconds == 0 {
            anyhow::bail!("Check interval cannot be 0");
        }

        if self.reconnect_delay_seconds == 0 {
            anyhow::bail!("Reconnect delay cannot be 0");
        }

        Ok(())
    }

    fn validate_port(port: u16, name: &str) -> anyhow::Result<()> {
        if port == 0 {
            anyhow::bail!("Invalid {} port: port cannot be 0", name);
        }
        if port < MIN_USER_PORT {
            anyhow::bail!(
                "Invalid {} port: {} is a privileged port (< {}). Use a port >= {}",
                name,
                port,
                MIN_USER_PORT,
                MIN_USER_PORT
            );
        }
        Ok(())
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_seconds)
    }

    pub fn to_obs_config(&self) -> crate::domain::errors::Result<ObsConfig> {
        ObsConfig::new(
            self.obs_host.clone(),
            self.obs_port,
            self.obs_password.clone(),
        )
    }

    pub fn to_telegram_config(&self) -> crate::domain::errors::Result<TelegramConfig> {
        TelegramConfig::new(
            self.telegram_bot_token.clone(),
            self.telegram_chat_id.clone(),
        )?
        .with_api_base(self.telegram_api_base.clone())
    }

    pub fn to_streamer_profile(&self) -> crate::domain::errors::Result<StreamerProfile> {
        StreamerProfile::with_platform(
            self.streamer_name.clone(),
            self.platform_name.clone(),
            self.platform_url.clone(),
        )
    }

    pub fn to_reconnect_policy(&self) -> crate::domain::errors::Result<ReconnectPolicy> {
        ReconnectPolicy::new(Duration::from_secs(self.reconnect_delay_seconds))
    }
}
