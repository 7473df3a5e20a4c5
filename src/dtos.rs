use crate::{
    messages::chat_message::ChatMessage,
    settings::{extension_settings::Settings, settings_panel::Control},
};

/// One line of driver input.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub enum ClientMessage {
    /// The character produced a message.
    MessageReceived(ChatMessage),
    /// The user sent a message.
    MessageSent(ChatMessage),
    Toggle { control: Control, checked: bool },
}

/// One line of driver output.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub enum ServerMessage {
    MessageUpdated { id: usize, message: ChatMessage },
    SettingsChanged(Settings),
}
