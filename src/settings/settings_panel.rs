use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use super::{extension_settings::Settings, settings_store::SettingsStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    Enabled,
    Incoming,
    Outgoing,
}

impl Control {
    pub const ALL: [Control; 3] = [Control::Enabled, Control::Incoming, Control::Outgoing];

    pub fn element_id(self) -> &'static str {
        match self {
            Control::Enabled => "quote_formatter_enabled",
            Control::Incoming => "quote_formatter_incoming",
            Control::Outgoing => "quote_formatter_outgoing",
        }
    }

    fn read(self, settings: &Settings) -> bool {
        match self {
            Control::Enabled => settings.enabled,
            Control::Incoming => settings.process_incoming,
            Control::Outgoing => settings.process_outgoing,
        }
    }

    fn write(self, settings: &mut Settings, checked: bool) {
        match self {
            Control::Enabled => settings.enabled = checked,
            Control::Incoming => settings.process_incoming = checked,
            Control::Outgoing => settings.process_outgoing = checked,
        }
    }
}

/// The three checkboxes of the extension's settings drawer.
pub struct SettingsPanel {
    store: Arc<SettingsStore>,
}

impl SettingsPanel {
    pub fn new(store: Arc<SettingsStore>) -> Self {
        Self { store }
    }

    pub fn checkbox_states(&self) -> Vec<(Control, bool)> {
        let settings = self.store.get();
        Control::ALL
            .iter()
            .map(|&control| (control, control.read(&settings)))
            .collect()
    }

    pub fn on_change(&self, control: Control, checked: bool) -> Settings {
        let settings = self.store.update(|s| control.write(s, checked));
        info!("{} set to {}", control.element_id(), checked);
        self.store.save_debounced();
        settings
    }
}
