mod connection_state;
mod live_state;
mod notification_message;
mod obs_config;
mod reconnect_policy;
mod stream_event;
mod streamer_profile;
mod telegram_config;

pub use connection_state::ConnectionState;
pub use live_state::LiveState;
pub use notification_message::{NotificationKind, NotificationMessage};
pub use obs_config::ObsConfig;
pub use reconnect_policy::ReconnectPolicy;
pub use stream_event::{OutputState, RawEvent, RouteDecision, StreamEvent, STREAM_STATE_CHANGED};
pub use streamer_profile::StreamerProfile;
pub use telegram_config::TelegramConfig;
