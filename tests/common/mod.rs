use std::{path::PathBuf, time::Duration};

use quote_formatter::dtos::ServerMessage;
use quote_formatter::{run_app, GeneralConfig, GeneralConfigBuilder, GenericResult};

pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("quote_formatter-{}-{}", rand::random::<u64>(), name))
}

pub fn default_builder() -> GeneralConfigBuilder {
    let mut builder = GeneralConfigBuilder::default();
    builder
        .settings_path(temp_path("settings.json"))
        .chat_path(Some(temp_path("chat.json")))
        .settings_save_delay(Duration::from_millis(20));
    builder
}

/// Feeds `lines` to the driver and parses what it writes back.
pub async fn run_lines(config: GeneralConfig, lines: &[&str]) -> GenericResult<Vec<ServerMessage>> {
    let input = lines.join("\n");
    let mut output = Vec::new();
    run_app(config, input.as_bytes(), &mut output).await?;
    let mut replies = Vec::new();
    for line in String::from_utf8(output)?.lines() {
        replies.push(serde_json::from_str(line)?);
    }
    Ok(replies)
}
