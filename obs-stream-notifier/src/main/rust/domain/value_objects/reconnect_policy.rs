use std::time::Duration;

use crate::domain::errors::{DomainError, Result};

/// Fixed-delay policy for event source reconnection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    delay: Duration,
}

impl ReconnectPolicy {
    pub fn new(delay: Duration) -> Result<Self> {
        if delay.is_zero() {
            return Err(DomainError::InvalidReconnectDelay);
        }

        Ok(Self { delay })
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(5),
        }
    }
}
