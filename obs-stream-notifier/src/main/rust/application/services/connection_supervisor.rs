use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::domain::entities::ConnectionLifecycle;
use crate::domain::errors::ConnectionError;
use crate::domain::ports::{EventHandler, EventSource, MetricsReporter};
use crate::domain::value_objects::{ConnectionState, ReconnectPolicy};

/// Application service keeping the event source connected
pub struct ConnectionSupervisor {
    source: Box<dyn EventSource>,
    handler: Arc<dyn EventHandler>,
    lifecycle: ConnectionLifecycle,
    policy: ReconnectPolicy,
    metrics: Arc<dyn MetricsReporter>,
}

impl ConnectionSupervisor {
    pub fn new(
        source: Box<dyn EventSource>,
        handler: Arc<dyn EventHandler>,
        policy: ReconnectPolicy,
        metrics: Arc<dyn MetricsReporter>,
    ) -> Self {
        Self {
            source,
            handler,
            lifecycle: ConnectionLifecycle::new(),
            policy,
            metrics,
        }
    }

    pub fn current_state(&self) -> ConnectionState {
        *self.lifecycle.current_state()
    }

    pub fn lifecycle(&self) -> &ConnectionLifecycle {
        &self.lifecycle
    }

    /// Connect, deliver events, and reconnect after a fixed delay on any
    /// failure. Returns only once `shutdown` is cancelled.
    pub async fn run_with_reconnect(&mut self, shutdown: CancellationToken) {
        let endpoint = self.source.endpoint();

        while !shutdown.is_cancelled() {
            self.lifecycle.transition_to_connecting();
            self.metrics.report_state_change(self.lifecycle.current_state());
            tracing::info!(endpoint = %endpoint, "Connecting to event source");

            let outcome = tokio::select! {
                _ = shutdown.cancelled() => break,
                outcome = self.connect_and_run(&endpoint) => outcome,
            };

            if let Some(uptime) = self.lifecycle.uptime() {
                self.metrics.report_uptime(uptime.as_secs_f64());
            }

            let reason = match outcome {
                Ok(()) => {
                    tracing::warn!(endpoint = %endpoint, "Event source closed the connection");
                    "closed by peer".to_string()
                }
                Err(e) => {
                    tracing::error!(endpoint = %endpoint, error = %e, "Event source connection failed");
                    e.to_string()
                }
            };

            let attempt = self.lifecycle.transition_to_disconnected(Some(reason));
            self.metrics.report_state_change(self.lifecycle.current_state());
            self.metrics.report_reconnect_attempt();

            let delay = self.policy.delay();
            self.metrics.report_backoff(delay.as_secs_f64());
            tracing::info!("Reconnecting in {:?} (attempt {})...", delay, attempt);

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        tracing::info!("Connection supervisor stopped");
        self.lifecycle
            .transition_to_stopped(Some("Shutdown requested".to_string()));
        self.metrics.report_state_change(self.lifecycle.current_state());
    }

    async fn connect_and_run(&mut self, endpoint: &str) -> Result<(), ConnectionError> {
        self.source.connect().await?;
        self.source.register_handler(self.handler.clone());

        self.lifecycle.transition_to_connected();
        self.metrics.report_state_change(self.lifecycle.current_state());
        tracing::info!(endpoint = %endpoint, "Connected to event source");

        self.source.run().await
    }
}
