use tokio_tungstenite::tungstenite::protocol::WebSocketConfig;

/// Websocket configuration struct.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WebsocketConfig {
    /// Maximum total message size of a websocket message.
    pub max_message_size: usize,

    /// Maximum websocket frame size.
    pub max_frame_size: usize,
}

impl WebsocketConfig {
    /// The default client WebsocketConfig.
    pub const CLIENT_DEFAULT: WebsocketConfig = WebsocketConfig {
        max_message_size: 64 << 20,
        max_frame_size: 16 << 20,
    };

    /// The default listener WebsocketConfig.
    pub const LISTENER_DEFAULT: WebsocketConfig = WebsocketConfig {
        max_message_size: 64 << 20,
        max_frame_size: 16 << 20,
    };

    /// Internal convert to tungstenite config.
    pub(crate) fn to_tungstenite(self) -> WebSocketConfig {
        let mut config = WebSocketConfig::default();
        config.max_message_size = Some(self.max_message_size);
        config.max_frame_size = Some(self.max_frame_size);
        config
    }
}

impl Default for WebsocketConfig {
    fn default() -> Self {
        Self::CLIENT_DEFAULT
    }
}
