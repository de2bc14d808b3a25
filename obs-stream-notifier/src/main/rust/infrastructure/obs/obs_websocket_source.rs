use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use super::protocol::{self, Identify, ServerMessage};
use crate::domain::errors::ConnectionError;
use crate::domain::ports::{EventHandler, EventSource};
use crate::domain::value_objects::{ObsConfig, RawEvent};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Event source backed by the OBS WebSocket v5 server
pub struct ObsWebSocketSource {
    config: ObsConfig,
    keepalive: Duration,
    stream: Option<WsStream>,
    handler: Option<Arc<dyn EventHandler>>,
}

impl ObsWebSocketSource {
    /// `keepalive` is the ping interval; a peer silent for two intervals is dropped
    pub fn new(config: ObsConfig, keepalive: Duration) -> Self {
        Self {
            config,
            keepalive,
            stream: None,
            handler: None,
        }
    }

    async fn handshake(config: &ObsConfig, ws: &mut WsStream) -> Result<(), ConnectionError> {
        let hello = match next_message(ws).await? {
            ServerMessage::Hello(hello) => hello,
            other => {
                return Err(ConnectionError::Handshake(format!(
                    "expected Hello, got {:?}",
                    other
                )))
            }
        };
        tracing::debug!(
            version = ?hello.obs_web_socket_version,
            rpc_version = hello.rpc_version,
            auth_required = hello.authentication.is_some(),
            "Received Hello"
        );

        let authentication = hello
            .authentication
            .as_ref()
            .map(|auth| protocol::authentication_response(config.password(), auth));

        let identify = Identify {
            rpc_version: protocol::RPC_VERSION,
            authentication,
            event_subscriptions: protocol::SUBSCRIPTION_OUTPUTS,
        };
        ws.send(Message::Text(protocol::encode_identify(&identify)?))
            .await
            .map_err(|e| ConnectionError::Transport(e.to_string()))?;

        match next_message(ws).await? {
            ServerMessage::Identified(identified) => {
                tracing::debug!(
                    rpc_version = identified.negotiated_rpc_version,
                    "Identified with OBS"
                );
                Ok(())
            }
            other => Err(ConnectionError::Handshake(format!(
                "expected Identified, got {:?}",
                other
            ))),
        }
    }
}

#[async_trait]
impl EventSource for ObsWebSocketSource {
    async fn connect(&mut self) -> Result<(), ConnectionError> {
        self.stream = None;

        let url = self.config.websocket_url();
        let (mut ws, _) = tokio_tungstenite::connect_async(url.as_str())
            .await
            .map_err(|e| ConnectionError::Connect {
                endpoint: url.clone(),
                reason: e.to_string(),
            })?;

        Self::handshake(&self.config, &mut ws).await?;
        self.stream = Some(ws);
        Ok(())
    }

    fn register_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handler = Some(handler);
    }

    async fn run(&mut self) -> Result<(), ConnectionError> {
        let handler = self.handler.clone().ok_or(ConnectionError::NoHandler)?;
        let mut ws = self.stream.take().ok_or(ConnectionError::NotConnected)?;

        let mut keepalive = tokio::time::interval_at(Instant::now() + self.keepalive, self.keepalive);
        keepalive.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_seen = Instant::now();

        loop {
            tokio::select! {
                frame = ws.next() => {
                    match frame {
                        None => return Err(ConnectionError::Closed("stream ended".to_string())),
                        Some(Err(e)) => return Err(ConnectionError::Transport(e.to_string())),
                        Some(Ok(Message::Text(text))) => match protocol::decode(&text) {
                            Ok(ServerMessage::Event(event)) => {
                                tracing::debug!(event_type = %event.event_type, "OBS event");
                                handler
                                    .handle(RawEvent::new(event.event_type, event.event_data))
                                    .await;
                            }
                            Ok(other) => tracing::trace!(message = ?other, "Ignoring OBS message"),
                            Err(e) => tracing::warn!(error = %e, "Skipping undecodable OBS frame"),
                        },
                        Some(Ok(Message::Close(frame))) => {
                            return match frame {
                                Some(frame) if u16::from(frame.code) != 1000 => Err(close_error(Some(frame))),
                                _ => Ok(()),
                            };
                        }
                        Some(Ok(_)) => {}
                    }
                    // Refreshed once the handler returns, so handler time never counts as silence
                    last_seen = Instant::now();
                }
                _ = keepalive.tick() => {
                    if last_seen.elapsed() > self.keepalive * 2 {
                        return Err(ConnectionError::Transport(format!(
                            "no traffic from OBS for {:?}",
                            last_seen.elapsed()
                        )));
                    }
                    ws.send(Message::Ping(Vec::new()))
                        .await
                        .map_err(|e| ConnectionError::Transport(e.to_string()))?;
                }
            }
        }
    }

    fn endpoint(&self) -> String {
        self.config.websocket_url()
    }
}

async fn next_message(ws: &mut WsStream) -> Result<ServerMessage, ConnectionError> {
    loop {
        match ws.next().await {
            None => {
                return Err(ConnectionError::Closed(
                    "connection ended during handshake".to_string(),
                ))
            }
            Some(Err(e)) => return Err(ConnectionError::Transport(e.to_string())),
            Some(Ok(Message::Text(text))) => return protocol::decode(&text),
            Some(Ok(Message::Close(frame))) => return Err(close_error(frame)),
            Some(Ok(_)) => continue,
        }
    }
}

fn close_error(frame: Option<CloseFrame<'_>>) -> ConnectionError {
    match frame {
        Some(frame) => {
            let code = u16::from(frame.code);
            if code == protocol::CLOSE_AUTHENTICATION_FAILED {
                ConnectionError::AuthenticationRejected(frame.reason.to_string())
            } else {
                ConnectionError::Closed(format!("code {}: {}", code, frame.reason))
            }
        }
        None => ConnectionError::Closed("no close frame".to_string()),
    }
}
