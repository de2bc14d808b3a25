use std::time::{Duration, Instant};

use crate::domain::value_objects::ConnectionState;

/// State transition record
#[derive(Debug, Clone)]
pub struct StateTransition {
    pub from: ConnectionState,
    pub to: ConnectionState,
    pub timestamp: Instant,
    pub reason: Option<String>,
}

/// Keeps at most this many transitions; the loop never terminates on its own.
const MAX_HISTORY: usize = 64;

/// Lifecycle of the event source connection
#[derive(Debug)]
pub struct ConnectionLifecycle {
    current_state: ConnectionState,
    state_history: Vec<StateTransition>,
    transition_count: usize,
    failed_attempts: u32,
    connected_at: Option<Instant>,
}

impl ConnectionLifecycle {
    pub fn new() -> Self {
        Self {
            current_state: ConnectionState::Disconnected,
            state_history: Vec::new(),
            transition_count: 0,
            failed_attempts: 0,
            connected_at: None,
        }
    }

    pub fn current_state(&self) -> &ConnectionState {
        &self.current_state
    }

    /// Time spent in the current connection, if connected
    pub fn uptime(&self) -> Option<Duration> {
        self.connected_at.map(|start| start.elapsed())
    }

    pub fn transition_count(&self) -> usize {
        self.transition_count
    }

    /// Failures since the last successful connection
    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    pub fn last_transition(&self) -> Option<&StateTransition> {
        self.state_history.last()
    }

    pub fn transition_to_connecting(&mut self) {
        self.record_transition(ConnectionState::Connecting, None);
    }

    pub fn transition_to_connected(&mut self) {
        self.record_transition(ConnectionState::Connected, None);
        self.failed_attempts = 0;
        self.connected_at = Some(Instant::now());
    }

    /// Returns the number of consecutive failed attempts, this one included
    pub fn transition_to_disconnected(&mut self, reason: Option<String>) -> u32 {
        self.record_transition(ConnectionState::Disconnected, reason);
        self.failed_attempts = self.failed_attempts.saturating_add(1);
        self.connected_at = None;
        self.failed_attempts
    }

    pub fn transition_to_stopped(&mut self, reason: Option<String>) {
        self.record_transition(ConnectionState::Stopped, reason);
        self.connected_at = None;
    }

    fn record_transition(&mut self, new_state: ConnectionState, reason: Option<String>) {
        let transition = StateTransition {
            from: self.current_state,
            to: new_state,
            timestamp: Instant::now(),
            reason,
        };

        if self.state_history.len() == MAX_HISTORY {
            self.state_history.remove(0);
        }
        self.state_history.push(transition);
        self.transition_count += 1;
        self.current_state = new_state;
    }
}

impl Default for ConnectionLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
