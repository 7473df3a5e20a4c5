#[cfg(test)]
#[macro_use]
extern crate rstest;

pub mod dtos;
pub mod host;
pub mod messages;
#[cfg(test)]
mod mock;
pub mod settings;
#[cfg(test)]
mod test_utils;

use std::{error::Error, path::PathBuf, sync::Arc, time::Duration};

use derive_builder::Builder;
use dtos::{ClientMessage, ServerMessage};
use host::{
    chat_host::{ChatHost, InMemoryChat, SharedChatHost},
    event_source::{EventSource, LocalEventBus},
};
use log::{info, warn};
use messages::{
    interceptor::MessageInterceptor, message_formatter::MessageFormatter,
    quote_formatter_impl::QuoteFormatterImpl,
};
use settings::{
    extension_settings::MODULE_NAME, settings_panel::SettingsPanel,
    settings_repository::JsonFileSettingsRepository, settings_store::SettingsStore,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub type GenericResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

#[derive(Debug, Clone, Builder)]
pub struct GeneralConfig {
    /// Host file holding every extension's settings.
    pub settings_path: PathBuf,
    /// Where the chat is written on save; `None` keeps it in memory only.
    pub chat_path: Option<PathBuf>,
    pub settings_save_delay: Duration,
}

/// Loads the settings, creating them on first use, and subscribes the
/// interceptor to both message events.
pub async fn init_extension(
    settings: Arc<SettingsStore>,
    formatter: Arc<dyn MessageFormatter + Send + Sync>,
    host: SharedChatHost,
    events: &mut dyn EventSource,
) -> GenericResult<Arc<MessageInterceptor>> {
    settings.load().await?;
    let interceptor = Arc::new(MessageInterceptor::new(settings, formatter, host));
    events.on_message_received(interceptor.clone());
    events.on_message_sent(interceptor.clone());
    info!("Quote Formatter extension initialized");
    Ok(interceptor)
}

/// Plays the host: every input line is a [`ClientMessage`], every output
/// line the resulting [`ServerMessage`].
pub async fn run_app<R, W>(general_config: GeneralConfig, input: R, output: W) -> GenericResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let repository = Arc::new(JsonFileSettingsRepository::new(
        &general_config.settings_path,
        MODULE_NAME,
    ));
    let settings = Arc::new(SettingsStore::new(
        repository,
        general_config.settings_save_delay,
    ));
    let chat = Arc::new(InMemoryChat::open(general_config.chat_path.clone()).await?);
    let mut events = LocalEventBus::new();
    init_extension(
        settings.clone(),
        Arc::new(QuoteFormatterImpl {}),
        chat.clone(),
        &mut events,
    )
    .await?;
    let panel = SettingsPanel::new(settings.clone());

    let mut output = output;
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let client_message = match serde_json::from_str(&line) {
            Ok(m) => m,
            Err(e) => {
                warn!("skipping malformed input line: {}", e);
                continue;
            }
        };
        let reply = handle_client_message(client_message, &chat, &events, &panel).await;
        write_line(&mut output, &reply).await?;
    }
    settings.flush().await
}

async fn handle_client_message(
    client_message: ClientMessage,
    chat: &InMemoryChat,
    events: &LocalEventBus,
    panel: &SettingsPanel,
) -> ServerMessage {
    match client_message {
        ClientMessage::MessageReceived(mut message) => {
            let id = chat.push(message.clone());
            events.emit_message_received(id, &mut message).await;
            ServerMessage::MessageUpdated { id, message }
        }
        ClientMessage::MessageSent(message) => {
            let id = chat.push(message);
            events.emit_message_sent(id).await;
            let message = chat.message(id).await.unwrap_or_default();
            ServerMessage::MessageUpdated { id, message }
        }
        ClientMessage::Toggle { control, checked } => {
            ServerMessage::SettingsChanged(panel.on_change(control, checked))
        }
    }
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, msg: &ServerMessage) -> GenericResult<()> {
    let mut line = serde_json::to_vec(msg)?;
    line.push(b'\n');
    output.write_all(&line).await?;
    output.flush().await?;
    Ok(())
}
