use thiserror::Error;

/// Validation failures for configuration and value objects
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid OBS host: host cannot be empty")]
    EmptyHost,

    #[error("Invalid port: port cannot be zero")]
    InvalidPort,

    #[error("Telegram bot token cannot be empty")]
    EmptyBotToken,

    #[error("Telegram chat id cannot be empty")]
    EmptyChatId,

    #[error("Streamer name cannot be empty")]
    EmptyStreamerName,

    #[error("Invalid platform URL: {0}")]
    InvalidPlatformUrl(String),

    #[error("Invalid API base URL: {0}")]
    InvalidApiBase(String),

    #[error("Invalid reconnect delay: delay cannot be zero")]
    InvalidReconnectDelay,

    #[error("Invalid timeout: timeout cannot be zero")]
    InvalidTimeout,

    #[error("HTTP client initialization failed: {0}")]
    HttpClientInit(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;

/// Failure to reach or keep the event source connection
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("Failed to connect to {endpoint}: {reason}")]
    Connect { endpoint: String, reason: String },

    #[error("Handshake failed: {0}")]
    Handshake(String),

    #[error("Authentication rejected: {0}")]
    AuthenticationRejected(String),

    #[error("Connection closed: {0}")]
    Closed(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Event source is not connected")]
    NotConnected,

    #[error("No event handler registered")]
    NoHandler,
}

/// Failure to deliver a notification to the messaging endpoint
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Messaging endpoint rejected message with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Messaging endpoint unreachable: {0}")]
    Transport(String),
}

impl DeliveryError {
    /// HTTP status code, when the endpoint answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }
}

/// Event payload did not have the expected shape
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MalformedEventError {
    #[error("Missing field '{0}' in event payload")]
    MissingField(&'static str),

    #[error("Field '{field}' has wrong type, expected {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}
