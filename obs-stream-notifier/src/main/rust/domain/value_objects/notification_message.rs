use super::StreamerProfile;

/// Which transition a notification announces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Online,
    Offline,
}

/// Pre-formatted HTML notification body
///
/// Text is passed through verbatim: names and URLs are not escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    kind: NotificationKind,
    body: String,
}

impl NotificationMessage {
    pub fn online(profile: &StreamerProfile) -> Self {
        let platform = profile.platform_name();
        let body = format!(
            "💙 <b>Live on {platform}!</b>\n\
             📺 Streamer: {name}\n\
             \n\
             🔥 Join in and watch right here 👇\n\
             <a href=\"{url}\">Watch on {platform}</a>",
            platform = platform,
            name = profile.name(),
            url = profile.watch_url(),
        );

        Self {
            kind: NotificationKind::Online,
            body,
        }
    }

    pub fn offline() -> Self {
        let body = "🔴 <b>Stream ended</b>\n\
                    🕹️ Thanks for being with us 💫\n\
                    💬 Support the streamer and don't miss the next broadcast!\n\
                    📅 Stay tuned, we'll be live again soon 💥"
            .to_string();

        Self {
            kind: NotificationKind::Offline,
            body,
        }
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}
