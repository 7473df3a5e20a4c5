use std::sync::Arc;

use crate::messages::chat_message::ChatMessage;

/// Payload of the host's message-received event.
#[derive(Debug)]
pub struct MessageReceived<'a> {
    pub id: usize,
    pub message: &'a mut ChatMessage,
}

#[async_trait::async_trait]
pub trait MessageReceivedHandler: Send + Sync {
    async fn on_message_received(&self, event: MessageReceived<'_>);
}

#[async_trait::async_trait]
pub trait MessageSentHandler: Send + Sync {
    async fn on_message_sent(&self, id: usize);
}

/// Subscription side of the host's event bus.
pub trait EventSource {
    fn on_message_received(&mut self, handler: Arc<dyn MessageReceivedHandler>);
    fn on_message_sent(&mut self, handler: Arc<dyn MessageSentHandler>);
}

/// Dispatches events in-process. Each emit runs every handler to completion,
/// in registration order, before returning.
#[derive(Default)]
pub struct LocalEventBus {
    received: Vec<Arc<dyn MessageReceivedHandler>>,
    sent: Vec<Arc<dyn MessageSentHandler>>,
}

impl LocalEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn emit_message_received(&self, id: usize, message: &mut ChatMessage) {
        for handler in &self.received {
            handler
                .on_message_received(MessageReceived {
                    id,
                    message: &mut *message,
                })
                .await;
        }
    }

    pub async fn emit_message_sent(&self, id: usize) {
        for handler in &self.sent {
            handler.on_message_sent(id).await;
        }
    }
}

impl EventSource for LocalEventBus {
    fn on_message_received(&mut self, handler: Arc<dyn MessageReceivedHandler>) {
        self.received.push(handler);
    }

    fn on_message_sent(&mut self, handler: Arc<dyn MessageSentHandler>) {
        self.sent.push(handler);
    }
}
