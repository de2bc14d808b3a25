mod obs_websocket_source;
pub mod protocol;

pub use obs_websocket_source::ObsWebSocketSource;
