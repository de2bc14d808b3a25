mod connection_supervisor;
mod event_router;
mod stream_tracker;

pub use connection_supervisor::ConnectionSupervisor;
pub use event_router::EventRouter;
pub use stream_tracker::{StreamStateTracker, TransitionOutcome};
