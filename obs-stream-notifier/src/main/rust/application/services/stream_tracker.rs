use std::sync::Arc;

use crate::domain::errors::DeliveryError;
use crate::domain::ports::{MetricsReporter, Notifier};
use crate::domain::value_objects::{LiveState, NotificationMessage, StreamerProfile};

/// Result of a requested live/offline transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Already in the requested state; nothing sent
    Unchanged,
    /// State changed and the notification was delivered
    Notified,
    /// State changed but delivery failed; the state change stands
    NotificationFailed(DeliveryError),
}

impl TransitionOutcome {
    pub fn changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Latch that turns repeated raw events into one notification per edge
pub struct StreamStateTracker {
    state: LiveState,
    profile: StreamerProfile,
    notifier: Arc<dyn Notifier>,
    metrics: Arc<dyn MetricsReporter>,
}

impl StreamStateTracker {
    pub fn new(
        profile: StreamerProfile,
        notifier: Arc<dyn Notifier>,
        metrics: Arc<dyn MetricsReporter>,
    ) -> Self {
        Self {
            state: LiveState::Offline,
            profile,
            notifier,
            metrics,
        }
    }

    pub fn state(&self) -> LiveState {
        self.state
    }

    pub async fn mark_live(&mut self) -> TransitionOutcome {
        if self.state.is_live() {
            tracing::debug!("Stream already live, skipping notification");
            return TransitionOutcome::Unchanged;
        }

        self.set_state(LiveState::Live);
        tracing::info!(
            streamer = %self.profile.name(),
            url = %self.profile.watch_url(),
            "Stream is live"
        );

        let message = NotificationMessage::online(&self.profile);
        self.notify(message).await
    }

    pub async fn mark_offline(&mut self) -> TransitionOutcome {
        if !self.state.is_live() {
            tracing::debug!("Stream already offline, skipping notification");
            return TransitionOutcome::Unchanged;
        }

        self.set_state(LiveState::Offline);
        tracing::info!(streamer = %self.profile.name(), "Stream ended");

        self.notify(NotificationMessage::offline()).await
    }

    fn set_state(&mut self, state: LiveState) {
        self.state = state;
        self.metrics.report_live_state(state);
    }

    async fn notify(&self, message: NotificationMessage) -> TransitionOutcome {
        match self.notifier.send(message.body()).await {
            Ok(()) => {
                self.metrics.report_notification(message.kind(), true);
                tracing::info!(kind = ?message.kind(), "Notification sent");
                TransitionOutcome::Notified
            }
            Err(e) => {
                // Dropped: no retry queue
                self.metrics.report_notification(message.kind(), false);
                TransitionOutcome::NotificationFailed(e)
            }
        }
    }
}
