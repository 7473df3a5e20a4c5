pub mod chat_host;
pub mod event_source;
