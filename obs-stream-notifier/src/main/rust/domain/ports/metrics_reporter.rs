use crate::domain::value_objects::{ConnectionState, LiveState, NotificationKind};

/// Port for metrics reporting
pub trait MetricsReporter: Send + Sync {
    fn report_state_change(&self, state: &ConnectionState);
    fn report_reconnect_attempt(&self);
    fn report_backoff(&self, delay_secs: f64);
    fn report_uptime(&self, uptime_secs: f64);
    fn report_live_state(&self, state: LiveState);
    fn report_notification(&self, kind: NotificationKind, delivered: bool);
    fn report_event_ignored(&self);
    fn report_event_malformed(&self);
}
