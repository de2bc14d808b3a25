use crate::domain::errors::{DomainError, Result};

pub const DEFAULT_PLATFORM_NAME: &str = "Twitch";
pub const DEFAULT_PLATFORM_URL: &str = "https://www.twitch.tv";

/// Who is streaming and where viewers can watch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamerProfile {
    name: String,
    platform_name: String,
    platform_url: String,
}

impl StreamerProfile {
    pub fn new(name: String) -> Result<Self> {
        Self::with_platform(
            name,
            DEFAULT_PLATFORM_NAME.to_string(),
            DEFAULT_PLATFORM_URL.to_string(),
        )
    }

    pub fn with_platform(name: String, platform_name: String, platform_url: String) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(DomainError::EmptyStreamerName);
        }
        if !platform_url.starts_with("https://") && !platform_url.starts_with("http://") {
            return Err(DomainError::InvalidPlatformUrl(platform_url));
        }

        Ok(Self {
            name,
            platform_name,
            platform_url: platform_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn platform_name(&self) -> &str {
        &self.platform_name
    }

    pub fn watch_url(&self) -> String {
        format!("{}/{}", self.platform_url, self.name)
    }
}
