pub mod chat_message;
pub mod interceptor;
pub mod message_formatter;
pub mod quote_formatter_impl;
