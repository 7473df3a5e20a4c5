use std::{
    fmt::{Display, Formatter},
    io::ErrorKind,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use serde_json::{Map, Value};

use super::extension_settings::Settings;
use crate::GenericResult;

/// The record as the host stores it; fields may be missing after an update.
pub type RawSettings = Map<String, Value>;

#[async_trait::async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn load(&self) -> GenericResult<Option<RawSettings>>;
    async fn save(&self, settings: Settings) -> GenericResult<()>;
}
pub type SharedSettingsRepository = Arc<dyn SettingsRepository>;

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Malformed(serde_json::Error),
    NotAnObject(String),
}
impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "settings io error: {}", e),
            SettingsError::Malformed(e) => write!(f, "malformed settings: {}", e),
            SettingsError::NotAnObject(key) => write!(f, "settings entry {} is not an object", key),
        }
    }
}
impl std::error::Error for SettingsError {}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}
impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Malformed(e)
    }
}

/// Host settings file: one JSON object holding every extension's record.
/// Only the entry under `key` is read or replaced.
#[derive(Debug, Clone)]
pub struct JsonFileSettingsRepository {
    path: PathBuf,
    key: String,
}

impl JsonFileSettingsRepository {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    async fn read_all(&self) -> Result<RawSettings, SettingsError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Map::new());
        }
        match serde_json::from_slice(&bytes)? {
            Value::Object(all) => Ok(all),
            _ => Err(SettingsError::NotAnObject("<root>".to_string())),
        }
    }
}

#[async_trait::async_trait]
impl SettingsRepository for JsonFileSettingsRepository {
    async fn load(&self) -> GenericResult<Option<RawSettings>> {
        let mut all = self.read_all().await?;
        match all.remove(&self.key) {
            None => Ok(None),
            Some(Value::Object(raw)) => Ok(Some(raw)),
            Some(_) => Err(Box::new(SettingsError::NotAnObject(self.key.clone()))),
        }
    }

    async fn save(&self, settings: Settings) -> GenericResult<()> {
        let mut all = self.read_all().await?;
        all.insert(self.key.clone(), serde_json::to_value(settings)?);
        let bytes = serde_json::to_vec_pretty(&Value::Object(all))?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(SettingsError::from)?;
        Ok(())
    }
}

/// Keeps the record in memory and counts writes.
#[derive(Debug, Default)]
pub struct InMemorySettingsRepository {
    stored: Mutex<Option<RawSettings>>,
    saves: Mutex<Vec<Settings>>,
}

impl InMemorySettingsRepository {
    pub fn new(stored: Option<RawSettings>) -> Self {
        Self {
            stored: Mutex::new(stored),
            saves: Mutex::new(Vec::new()),
        }
    }

    pub fn saved(&self) -> Vec<Settings> {
        self.saves.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    async fn load(&self) -> GenericResult<Option<RawSettings>> {
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn save(&self, settings: Settings) -> GenericResult<()> {
        let raw = match serde_json::to_value(settings)? {
            Value::Object(raw) => raw,
            _ => return Err(Box::new(SettingsError::NotAnObject("settings".to_string()))),
        };
        *self.stored.lock().unwrap() = Some(raw);
        self.saves.lock().unwrap().push(settings);
        Ok(())
    }
}
