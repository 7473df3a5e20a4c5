mod common;

use common::*;
use quote_formatter::dtos::ServerMessage;
use quote_formatter::settings::extension_settings::Settings;
use quote_formatter::GenericResult;
use serde_json::{json, Value};

async fn stored(path: &std::path::Path) -> GenericResult<Value> {
    Ok(serde_json::from_slice(&tokio::fs::read(path).await?)?)
}

#[rstest::rstest]
#[tokio::test]
async fn it_should_create_default_settings_on_first_run() -> GenericResult<()> {
    let config = default_builder().build().unwrap();
    let settings_path = config.settings_path.clone();

    run_lines(config, &[]).await?;

    assert_eq!(
        stored(&settings_path).await?,
        json!({"quote_formatter": {
            "enabled": true,
            "processIncoming": true,
            "processOutgoing": true,
        }})
    );
    Ok(())
}

#[rstest::rstest]
#[tokio::test]
async fn it_should_backfill_and_keep_foreign_entries() -> GenericResult<()> {
    let config = default_builder().build().unwrap();
    let settings_path = config.settings_path.clone();
    tokio::fs::write(
        &settings_path,
        serde_json::to_vec(&json!({
            "other_extension": {"volume": 3},
            "quote_formatter": {"processIncoming": false},
        }))?,
    )
    .await?;

    let replies = run_lines(
        config,
        &[r#"{"MessageReceived":{"name":"Ann","mes":"\"*kept*\""}}"#],
    )
    .await?;

    match &replies[0] {
        ServerMessage::MessageUpdated { message, .. } => {
            assert_eq!(message.text(), Some("\"*kept*\""))
        }
        other => panic!("unexpected reply {:?}", other),
    }
    let all = stored(&settings_path).await?;
    assert_eq!(all["other_extension"], json!({"volume": 3}));
    assert_eq!(
        all["quote_formatter"],
        json!({"enabled": true, "processIncoming": false, "processOutgoing": true})
    );
    Ok(())
}

#[rstest::rstest]
#[tokio::test]
async fn it_should_persist_toggles() -> GenericResult<()> {
    let config = default_builder().build().unwrap();
    let settings_path = config.settings_path.clone();

    let replies = run_lines(
        config.clone(),
        &[
            r#"{"Toggle":{"control":"incoming","checked":false}}"#,
            r#"{"Toggle":{"control":"outgoing","checked":false}}"#,
        ],
    )
    .await?;

    let expected = Settings {
        enabled: true,
        process_incoming: false,
        process_outgoing: false,
    };
    assert_eq!(replies.last(), Some(&ServerMessage::SettingsChanged(expected)));
    assert_eq!(
        stored(&settings_path).await?["quote_formatter"],
        serde_json::to_value(expected)?
    );

    let replies = run_lines(
        config,
        &[r#"{"Toggle":{"control":"enabled","checked":false}}"#],
    )
    .await?;
    assert_eq!(
        replies,
        vec![ServerMessage::SettingsChanged(Settings {
            enabled: false,
            ..expected
        })]
    );
    Ok(())
}
