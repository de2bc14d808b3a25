use lazy_static::lazy_static;
use prometheus::{Encoder, Gauge, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

use crate::domain::ports::MetricsReporter;
use crate::domain::value_objects::{ConnectionState, LiveState, NotificationKind};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // Connection state (0=Disconnected, 1=Connecting, 2=Connected, 3=Stopped)
    pub static ref CONNECTION_STATE: Gauge = Gauge::new(
        "obs_connection_state",
        "Current OBS WebSocket connection state"
    ).expect("metric can be created");

    pub static ref RECONNECT_ATTEMPTS: IntCounter = IntCounter::new(
        "obs_reconnect_attempts_total",
        "Total number of reconnection attempts"
    ).expect("metric can be created");

    pub static ref BACKOFF_SECONDS: Gauge = Gauge::new(
        "obs_reconnect_backoff_seconds",
        "Current reconnection delay"
    ).expect("metric can be created");

    pub static ref LAST_UPTIME_SECONDS: Gauge = Gauge::new(
        "obs_last_connection_uptime_seconds",
        "Duration of the most recently ended connection"
    ).expect("metric can be created");

    // 1 while the stream is considered live
    pub static ref STREAM_LIVE: IntGauge = IntGauge::new(
        "stream_live",
        "Whether the stream is currently live"
    ).expect("metric can be created");

    pub static ref NOTIFICATIONS: IntCounterVec = IntCounterVec::new(
        Opts::new("notifications_total", "Notifications by kind and delivery result"),
        &["kind", "result"]
    ).expect("metric can be created");

    pub static ref EVENTS_IGNORED: IntCounter = IntCounter::new(
        "events_ignored_total",
        "Events that did not change stream state"
    ).expect("metric can be created");

    pub static ref EVENTS_MALFORMED: IntCounter = IntCounter::new(
        "events_malformed_total",
        "Stream state events with an unexpected payload"
    ).expect("metric can be created");
}

pub struct PrometheusReporter;

impl PrometheusReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn init_metrics() -> Result<(), prometheus::Error> {
        REGISTRY.register(Box::new(CONNECTION_STATE.clone()))?;
        REGISTRY.register(Box::new(RECONNECT_ATTEMPTS.clone()))?;
        REGISTRY.register(Box::new(BACKOFF_SECONDS.clone()))?;
        REGISTRY.register(Box::new(LAST_UPTIME_SECONDS.clone()))?;
        REGISTRY.register(Box::new(STREAM_LIVE.clone()))?;
        REGISTRY.register(Box::new(NOTIFICATIONS.clone()))?;
        REGISTRY.register(Box::new(EVENTS_IGNORED.clone()))?;
        REGISTRY.register(Box::new(EVENTS_MALFORMED.clone()))?;
        Ok(())
    }

    pub fn gather_metrics() -> Vec<u8> {
        let encoder = TextEncoder::new();
        let metric_families = REGISTRY.gather();
        let mut buffer = vec![];
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            tracing::error!("Failed to encode metrics: {}", e);
            return b"# Error encoding metrics\n".to_vec();
        }
        buffer
    }
}

impl Default for PrometheusReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsReporter for PrometheusReporter {
    fn report_state_change(&self, state: &ConnectionState) {
        CONNECTION_STATE.set(state.as_metric());
    }

    fn report_reconnect_attempt(&self) {
        RECONNECT_ATTEMPTS.inc();
    }

    fn report_backoff(&self, delay_secs: f64) {
        BACKOFF_SECONDS.set(delay_secs);
    }

    fn report_uptime(&self, uptime_secs: f64) {
        LAST_UPTIME_SECONDS.set(uptime_secs);
    }

    fn report_live_state(&self, state: LiveState) {
        STREAM_LIVE.set(if state.is_live() { 1 } else { 0 });
    }

    fn report_notification(&self, kind: NotificationKind, delivered: bool) {
        let kind = match kind {
            NotificationKind::Online => "online",
            NotificationKind::Offline => "offline",
        };
        let result = if delivered { "delivered" } else { "failed" };
        NOTIFICATIONS.with_label_values(&[kind, result]).inc();
    }

    fn report_event_ignored(&self) {
        EVENTS_IGNORED.inc();
    }

    fn report_event_malformed(&self) {
        EVENTS_MALFORMED.inc();
    }
}
