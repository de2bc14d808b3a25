use serde_json::Value;

use crate::domain::errors::MalformedEventError;

/// Event type OBS emits when the stream output changes state
pub const STREAM_STATE_CHANGED: &str = "StreamStateChanged";

const OUTPUT_STARTED: &str = "OBS_WEBSOCKET_OUTPUT_STARTED";
const OUTPUT_STOPPED: &str = "OBS_WEBSOCKET_OUTPUT_STOPPED";

/// An event as delivered by the event source, before interpretation
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvent {
    pub event_type: String,
    pub event_data: Value,
}

impl RawEvent {
    pub fn new(event_type: impl Into<String>, event_data: Value) -> Self {
        Self {
            event_type: event_type.into(),
            event_data,
        }
    }

    pub fn is_stream_state_change(&self) -> bool {
        self.event_type == STREAM_STATE_CHANGED
    }
}

/// Sub-state reported alongside the output's active flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputState {
    Started,
    Stopped,
    /// Starting, stopping, reconnecting, or anything newer than we know about
    Unknown,
}

impl OutputState {
    pub fn parse(raw: &str) -> Self {
        match raw {
            OUTPUT_STARTED => Self::Started,
            OUTPUT_STOPPED => Self::Stopped,
            _ => Self::Unknown,
        }
    }
}

/// What the router should do with a stream state event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    MarkLive,
    MarkOffline,
    Ignore,
}

/// A decoded stream state change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEvent {
    pub kind: String,
    pub active: bool,
    pub state: OutputState,
}

impl StreamEvent {
    pub fn new(kind: impl Into<String>, active: bool, state: OutputState) -> Self {
        Self {
            kind: kind.into(),
            active,
            state,
        }
    }

    /// Decode `outputActive` / `outputState` from the event payload
    pub fn from_raw(raw: &RawEvent) -> Result<Self, MalformedEventError> {
        let active = match raw.event_data.get("outputActive") {
            None | Some(Value::Null) => {
                return Err(MalformedEventError::MissingField("outputActive"))
            }
            Some(value) => value.as_bool().ok_or(MalformedEventError::WrongType {
                field: "outputActive",
                expected: "boolean",
            })?,
        };

        let state = match raw.event_data.get("outputState") {
            None | Some(Value::Null) => {
                return Err(MalformedEventError::MissingField("outputState"))
            }
            Some(value) => value.as_str().ok_or(MalformedEventError::WrongType {
                field: "outputState",
                expected: "string",
            })?,
        };

        Ok(Self::new(raw.event_type.clone(), active, OutputState::parse(state)))
    }

    /// Only consistent started/stopped pairs change anything
    pub fn decision(&self) -> RouteDecision {
        if self.kind != STREAM_STATE_CHANGED {
            return RouteDecision::Ignore;
        }
        match (self.active, self.state) {
            (true, OutputState::Started) => RouteDecision::MarkLive,
            (false, OutputState::Stopped) => RouteDecision::MarkOffline,
            _ => RouteDecision::Ignore,
        }
    }
}
