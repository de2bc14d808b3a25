//! OBS WebSocket v5 message framing.
//!
//! Every frame is a JSON object `{"op": <opcode>, "d": <payload>}`. Only the
//! handshake and event opcodes are modelled; anything else decodes to
//! [`ServerMessage::Other`].

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::domain::errors::ConnectionError;

pub const RPC_VERSION: u32 = 1;

pub const OP_HELLO: u8 = 0;
pub const OP_IDENTIFY: u8 = 1;
pub const OP_IDENTIFIED: u8 = 2;
pub const OP_EVENT: u8 = 5;

/// `EventSubscription::Outputs`, which carries `StreamStateChanged`
pub const SUBSCRIPTION_OUTPUTS: u32 = 1 << 6;

/// Close code sent by OBS when the identify authentication is wrong
pub const CLOSE_AUTHENTICATION_FAILED: u16 = 4009;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthChallenge {
    pub challenge: String,
    pub salt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hello {
    #[serde(default)]
    pub obs_web_socket_version: Option<String>,
    pub rpc_version: u32,
    #[serde(default)]
    pub authentication: Option<AuthChallenge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identify {
    pub rpc_version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<String>,
    pub event_subscriptions: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identified {
    pub negotiated_rpc_version: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMessage {
    pub event_type: String,
    #[serde(default)]
    pub event_intent: Option<u32>,
    #[serde(default)]
    pub event_data: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    Hello(Hello),
    Identified(Identified),
    Event(EventMessage),
    Other(u8),
}

#[derive(Deserialize)]
struct Envelope {
    op: u8,
    #[serde(default)]
    d: Value,
}

#[derive(Serialize)]
struct Outgoing<'a, T> {
    op: u8,
    d: &'a T,
}

pub fn decode(text: &str) -> Result<ServerMessage, ConnectionError> {
    let envelope: Envelope = serde_json::from_str(text)
        .map_err(|e| ConnectionError::Protocol(format!("invalid frame: {}", e)))?;

    let payload = envelope.d;
    let decoded = match envelope.op {
        OP_HELLO => serde_json::from_value(payload).map(ServerMessage::Hello),
        OP_IDENTIFIED => serde_json::from_value(payload).map(ServerMessage::Identified),
        OP_EVENT => serde_json::from_value(payload).map(ServerMessage::Event),
        other => Ok(ServerMessage::Other(other)),
    };

    decoded.map_err(|e| {
        ConnectionError::Protocol(format!("invalid payload for op {}: {}", envelope.op, e))
    })
}

pub fn encode_identify(identify: &Identify) -> Result<String, ConnectionError> {
    serde_json::to_string(&Outgoing {
        op: OP_IDENTIFY,
        d: identify,
    })
    .map_err(|e| ConnectionError::Protocol(e.to_string()))
}

/// `base64(sha256(base64(sha256(password + salt)) + challenge))`
pub fn authentication_response(password: &str, auth: &AuthChallenge) -> String {
    let secret = STANDARD.encode(Sha256::digest(format!("{}{}", password, auth.salt).as_bytes()));
    STANDARD.encode(Sha256::digest(format!("{}{}", secret, auth.challenge).as_bytes()))
}
