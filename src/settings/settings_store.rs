use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, RwLock,
    },
    time::Duration,
};

use log::{debug, error};
use serde_json::Value;

use super::{
    extension_settings::{Direction, Settings},
    settings_repository::{RawSettings, SettingsError, SharedSettingsRepository},
};
use crate::GenericResult;

/// Current settings plus the boundary to the host's persistent store.
pub struct SettingsStore {
    repository: SharedSettingsRepository,
    current: RwLock<Settings>,
    save_delay: Duration,
    generation: Arc<AtomicU64>,
}

impl SettingsStore {
    pub fn new(repository: SharedSettingsRepository, save_delay: Duration) -> Self {
        Self {
            repository,
            current: RwLock::new(Settings::default()),
            save_delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Reads the stored record, creating it from the defaults when absent and
    /// filling any flag it lacks. Either repair is written back.
    pub async fn load(&self) -> GenericResult<Settings> {
        let (settings, repaired) = match self.repository.load().await? {
            None => (Settings::default(), true),
            Some(raw) => backfill(raw)?,
        };
        if repaired {
            debug!("writing default quote formatter settings");
            self.repository.save(settings).await?;
        }
        *self.current.write().unwrap() = settings;
        Ok(settings)
    }

    pub fn get(&self) -> Settings {
        *self.current.read().unwrap()
    }

    pub fn should_process(&self, direction: Direction) -> bool {
        self.get().should_process(direction)
    }

    pub fn update(&self, f: impl FnOnce(&mut Settings)) -> Settings {
        let mut current = self.current.write().unwrap();
        f(&mut current);
        *current
    }

    /// Schedules a write of the current settings. A later call inside the
    /// delay window replaces the pending one.
    pub fn save_debounced(&self) {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = self.generation.clone();
        let repository = self.repository.clone();
        let delay = self.save_delay;
        let settings = self.get();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if generation.load(Ordering::SeqCst) != ticket {
                return;
            }
            if let Err(e) = repository.save(settings).await {
                error!("[Quote Formatter] Error saving settings: {}", e);
            }
        });
    }

    /// Writes the current settings now, cancelling any pending debounced save.
    pub async fn flush(&self) -> GenericResult<()> {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.repository.save(self.get()).await
    }
}

fn backfill(mut raw: RawSettings) -> Result<(Settings, bool), SettingsError> {
    let defaults = match serde_json::to_value(Settings::default())? {
        Value::Object(defaults) => defaults,
        _ => return Err(SettingsError::NotAnObject("defaults".to_string())),
    };
    let mut repaired = false;
    for (key, value) in defaults {
        if raw.get(&key).map_or(true, Value::is_null) {
            raw.insert(key, value);
            repaired = true;
        }
    }
    let settings = serde_json::from_value(Value::Object(raw))?;
    Ok((settings, repaired))
}
