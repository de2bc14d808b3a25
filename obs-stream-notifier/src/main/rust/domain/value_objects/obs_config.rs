use std::fmt;

use crate::domain::errors::{DomainError, Result};

/// Connection settings for the OBS WebSocket server
#[derive(Clone, PartialEq)]
pub struct ObsConfig {
    host: String,
    port: u16,
    password: String,
}

impl ObsConfig {
    pub fn new(host: String, port: u16, password: String) -> Result<Self> {
        if host.trim().is_empty() {
            return Err(DomainError::EmptyHost);
        }
        if port == 0 {
            return Err(DomainError::InvalidPort);
        }

        Ok(Self {
            host,
            port,
            password,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Empty when the server has authentication disabled
    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn websocket_url(&self) -> String {
        format!("ws://{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for ObsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObsConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &if self.password.is_empty() { "" } else { "<redacted>" })
            .finish()
    }
}
