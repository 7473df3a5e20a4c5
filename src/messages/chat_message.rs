use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single turn of the host's chat log.
///
/// Text fields stay as raw JSON so a record carrying `null` or a non-string
/// body still round-trips; only string content is ever rewritten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_user: bool,
    /// Primary text.
    #[serde(default)]
    pub mes: Value,
    /// Alternative generations for the same turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swipes: Option<Vec<Value>>,
}

impl ChatMessage {
    pub fn user(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_user: true,
            mes: Value::String(text.into()),
            swipes: None,
        }
    }

    pub fn character(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_user: false,
            mes: Value::String(text.into()),
            swipes: None,
        }
    }

    pub fn with_swipes(mut self, swipes: Vec<String>) -> Self {
        self.swipes = Some(swipes.into_iter().map(Value::String).collect());
        self
    }

    /// The primary text when it is a non-empty string.
    pub fn text(&self) -> Option<&str> {
        self.mes.as_str().filter(|text| !text.is_empty())
    }
}
