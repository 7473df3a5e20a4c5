use std::time::Duration;

use quote_formatter::{run_app, GeneralConfig, GenericResult};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> GenericResult<()> {
    pretty_env_logger::init();
    let general_config = GeneralConfig {
        settings_path: "settings.json".into(),
        chat_path: Some("chat.json".into()),
        settings_save_delay: Duration::from_millis(1000),
    };

    run_app(
        general_config,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await
}
