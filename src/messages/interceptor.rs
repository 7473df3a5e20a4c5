use std::sync::Arc;

use log::{debug, error};
use serde_json::Value;

use super::message_formatter::MessageFormatter;
use crate::{
    host::{
        chat_host::SharedChatHost,
        event_source::{MessageReceived, MessageReceivedHandler, MessageSentHandler},
    },
    settings::{extension_settings::Direction, settings_store::SettingsStore},
    GenericResult,
};

/// Reformats chat messages as the host reports them.
pub struct MessageInterceptor {
    settings: Arc<SettingsStore>,
    formatter: Arc<dyn MessageFormatter + Send + Sync>,
    host: SharedChatHost,
}

impl MessageInterceptor {
    pub fn new(
        settings: Arc<SettingsStore>,
        formatter: Arc<dyn MessageFormatter + Send + Sync>,
        host: SharedChatHost,
    ) -> Self {
        MessageInterceptor {
            settings,
            formatter,
            host,
        }
    }

    /// Formats the primary text and every swipe in place. Only a change to
    /// the primary text is pushed to the host.
    pub async fn handle_received(&self, event: MessageReceived<'_>) -> GenericResult<()> {
        if !self.settings.should_process(Direction::Incoming) {
            return Ok(());
        }
        let MessageReceived { id, message } = event;
        let original = match message.text() {
            Some(text) => text,
            None => return Ok(()),
        };
        let formatted = self.formatter.format(original);
        let changed = formatted != original;
        message.mes = Value::String(formatted);

        // Non-string entries are left where they are.
        if let Some(swipes) = message.swipes.as_mut() {
            for swipe in swipes.iter_mut() {
                if let Value::String(text) = swipe {
                    *text = self.formatter.format(text.as_str());
                }
            }
        }

        if changed {
            debug!("formatted incoming message {}", id);
            self.host.update_message_block(id, message).await?;
            self.host.save_chat_conditional().await?;
        }
        Ok(())
    }

    pub async fn handle_sent(&self, id: usize) -> GenericResult<()> {
        if !self.settings.should_process(Direction::Outgoing) {
            return Ok(());
        }
        let mut message = match self.host.message(id).await {
            Some(message) => message,
            None => return Ok(()),
        };
        let original = match message.text() {
            Some(text) => text,
            None => return Ok(()),
        };
        let formatted = self.formatter.format(original);
        if formatted == original {
            return Ok(());
        }
        message.mes = Value::String(formatted);
        debug!("formatted outgoing message {}", id);
        self.host.update_message_block(id, &message).await?;
        self.host.save_chat_conditional().await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl MessageReceivedHandler for MessageInterceptor {
    async fn on_message_received(&self, event: MessageReceived<'_>) {
        if let Err(e) = self.handle_received(event).await {
            error!("[Quote Formatter] Error processing incoming message: {}", e);
        }
    }
}

#[async_trait::async_trait]
impl MessageSentHandler for MessageInterceptor {
    async fn on_message_sent(&self, id: usize) {
        if let Err(e) = self.handle_sent(id).await {
            error!("[Quote Formatter] Error processing outgoing message: {}", e);
        }
    }
}
