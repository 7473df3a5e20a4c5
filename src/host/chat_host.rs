use std::{
    fmt::{Display, Formatter},
    path::PathBuf,
    sync::{Arc, Mutex},
};

use log::debug;

use crate::{messages::chat_message::ChatMessage, GenericResult};

/// The host's message-update API.
#[async_trait::async_trait]
pub trait ChatHost: Send + Sync {
    async fn message(&self, id: usize) -> Option<ChatMessage>;
    /// Re-renders the message at `id` with the given content.
    async fn update_message_block(&self, id: usize, message: &ChatMessage) -> GenericResult<()>;
    /// Persists the current chat if the host has one open.
    async fn save_chat_conditional(&self) -> GenericResult<()>;
}
pub type SharedChatHost = Arc<dyn ChatHost>;

#[derive(Debug)]
pub enum ChatHostError {
    MessageNotFound(usize),
    Io(std::io::Error),
}
impl Display for ChatHostError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatHostError::MessageNotFound(id) => write!(f, "message {} not found", id),
            ChatHostError::Io(e) => write!(f, "chat io error: {}", e),
        }
    }
}
impl std::error::Error for ChatHostError {}

/// A chat log kept in memory, optionally written to a JSON file on save.
#[derive(Debug, Default)]
pub struct InMemoryChat {
    messages: Mutex<Vec<ChatMessage>>,
    chat_path: Option<PathBuf>,
}

impl InMemoryChat {
    pub fn new(chat_path: Option<PathBuf>) -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            chat_path,
        }
    }

    /// Opens the chat stored at `chat_path`, starting empty when there is none.
    pub async fn open(chat_path: Option<PathBuf>) -> GenericResult<Self> {
        let messages = match &chat_path {
            Some(path) => match tokio::fs::read(path).await {
                Ok(bytes) => serde_json::from_slice(&bytes)?,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
                Err(e) => return Err(Box::new(ChatHostError::Io(e))),
            },
            None => Vec::new(),
        };
        Ok(Self {
            messages: Mutex::new(messages),
            chat_path,
        })
    }

    pub fn push(&self, message: ChatMessage) -> usize {
        let mut messages = self.messages.lock().unwrap();
        messages.push(message);
        messages.len() - 1
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ChatHost for InMemoryChat {
    async fn message(&self, id: usize) -> Option<ChatMessage> {
        self.messages.lock().unwrap().get(id).cloned()
    }

    async fn update_message_block(&self, id: usize, message: &ChatMessage) -> GenericResult<()> {
        let mut messages = self.messages.lock().unwrap();
        let slot = messages
            .get_mut(id)
            .ok_or(ChatHostError::MessageNotFound(id))?;
        *slot = message.clone();
        debug!("message {} re-rendered", id);
        Ok(())
    }

    async fn save_chat_conditional(&self) -> GenericResult<()> {
        let path = match &self.chat_path {
            Some(path) => path,
            None => return Ok(()),
        };
        let bytes = serde_json::to_vec_pretty(&self.messages())?;
        tokio::fs::write(path, bytes)
            .await
            .map_err(ChatHostError::Io)?;
        Ok(())
    }
}
