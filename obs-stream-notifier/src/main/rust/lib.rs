pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-exports for convenience
pub use application::services::{
    ConnectionSupervisor, EventRouter, StreamStateTracker, TransitionOutcome,
};
pub use config::Config;
pub use domain::entities::{ConnectionLifecycle, StateTransition};
pub use domain::errors::{ConnectionError, DeliveryError, DomainError, MalformedEventError, Result};
pub use domain::ports::{EventHandler, EventSource, MetricsReporter, Notifier};
pub use domain::value_objects::{
    ConnectionState, LiveState, NotificationKind, NotificationMessage, ObsConfig, OutputState,
    RawEvent, ReconnectPolicy, RouteDecision, StreamEvent, StreamerProfile, TelegramConfig,
    STREAM_STATE_CHANGED,
};
pub use infrastructure::metrics::{serve_metrics, PrometheusReporter};
pub use infrastructure::obs::ObsWebSocketSource;
pub use infrastructure::signals::wait_for_shutdown_signal;
pub use infrastructure::telegram::TelegramNotifier;
