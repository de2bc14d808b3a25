mod event_source;
mod metrics_reporter;
mod notifier;

pub use event_source::{EventHandler, EventSource};
pub use metrics_reporter::MetricsReporter;
pub use notifier::Notifier;
