use serde::{Deserialize, Serialize};

/// Key of this extension inside the host's extension settings.
pub const MODULE_NAME: &str = "quote_formatter";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub enabled: bool,
    /// Messages produced by the character.
    pub process_incoming: bool,
    /// Messages typed by the user.
    pub process_outgoing: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            process_incoming: true,
            process_outgoing: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Incoming,
    Outgoing,
}

impl Settings {
    pub fn should_process(&self, direction: Direction) -> bool {
        should_process(direction, self)
    }
}

pub fn should_process(direction: Direction, settings: &Settings) -> bool {
    settings.enabled
        && match direction {
            Direction::Incoming => settings.process_incoming,
            Direction::Outgoing => settings.process_outgoing,
        }
}
