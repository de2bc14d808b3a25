use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::ConnectionError;
use crate::domain::value_objects::RawEvent;

/// Sink for events delivered by an [`EventSource`]
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Invoked once per event, serially, from the source's read loop
    async fn handle(&self, event: RawEvent);
}

/// Port for the broadcasting application's event channel
#[async_trait]
pub trait EventSource: Send {
    /// Open the connection and complete any handshake
    async fn connect(&mut self) -> Result<(), ConnectionError>;

    /// Install the handler events are delivered to, replacing any previous one
    fn register_handler(&mut self, handler: Arc<dyn EventHandler>);

    /// Deliver events until the connection ends.
    /// Returns `Ok(())` if the peer closed cleanly, an error otherwise.
    async fn run(&mut self) -> Result<(), ConnectionError>;

    /// Human-readable endpoint for logs
    fn endpoint(&self) -> String;
}
