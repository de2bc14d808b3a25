use async_trait::async_trait;

use crate::domain::errors::DeliveryError;

/// Port for the messaging endpoint
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a pre-formatted message. Failures are returned, never retried.
    async fn send(&self, body: &str) -> Result<(), DeliveryError>;
}
