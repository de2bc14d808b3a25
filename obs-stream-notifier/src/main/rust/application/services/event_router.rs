use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::StreamStateTracker;
use crate::domain::ports::{EventHandler, MetricsReporter};
use crate::domain::value_objects::{LiveState, RawEvent, RouteDecision, StreamEvent};

/// Maps stream state events onto tracker transitions
pub struct EventRouter {
    tracker: Mutex<StreamStateTracker>,
    metrics: Arc<dyn MetricsReporter>,
}

impl EventRouter {
    pub fn new(tracker: StreamStateTracker, metrics: Arc<dyn MetricsReporter>) -> Self {
        Self {
            tracker: Mutex::new(tracker),
            metrics,
        }
    }

    pub async fn live_state(&self) -> LiveState {
        self.tracker.lock().await.state()
    }

    /// Apply a decoded event. Inconsistent active/state pairs are ignored.
    pub async fn route(&self, event: StreamEvent) -> RouteDecision {
        let decision = event.decision();

        match decision {
            RouteDecision::MarkLive => {
                self.tracker.lock().await.mark_live().await;
            }
            RouteDecision::MarkOffline => {
                self.tracker.lock().await.mark_offline().await;
            }
            RouteDecision::Ignore => {
                tracing::debug!(
                    kind = %event.kind,
                    active = event.active,
                    state = ?event.state,
                    "Ignoring stream event"
                );
                self.metrics.report_event_ignored();
            }
        }

        decision
    }
}

#[async_trait]
impl EventHandler for EventRouter {
    async fn handle(&self, event: RawEvent) {
        if !event.is_stream_state_change() {
            tracing::trace!(event_type = %event.event_type, "Skipping unrelated event");
            self.metrics.report_event_ignored();
            return;
        }

        match StreamEvent::from_raw(&event) {
            Ok(stream_event) => {
                self.route(stream_event).await;
            }
            Err(e) => {
                tracing::warn!(error = %e, payload = %event.event_data, "Skipping malformed event");
                self.metrics.report_event_malformed();
            }
        }
    }
}
