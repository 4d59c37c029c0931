//! Operation inputs.
//!
//! # Design
//! Each operation that takes optional fields gets a named input type instead
//! of a loose map, so presence checks happen in one place. Responses are not
//! modelled here: they are returned as `serde_json::Value`.

use serde::{Deserialize, Serialize};

pub const MIN_PRIORITY: i64 = 1;
pub const MAX_PRIORITY: i64 = 4;

/// Clamp a priority into `[MIN_PRIORITY, MAX_PRIORITY]`.
pub fn clamp_priority(priority: i64) -> i64 {
    priority.clamp(MIN_PRIORITY, MAX_PRIORITY)
}

/// Fields accepted by `addItem` and `updateItem`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFields {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_string: Option<String>,
    /// Clamped into 1..=4 before it is sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

impl ItemFields {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn date_string(mut self, date_string: impl Into<String>) -> Self {
        self.date_string = Some(date_string.into());
        self
    }

    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }
}

impl From<&str> for ItemFields {
    fn from(content: &str) -> Self {
        Self::new(content)
    }
}

impl From<String> for ItemFields {
    fn from(content: String) -> Self {
        Self::new(content)
    }
}

/// Paging offset for completed items, as a number or as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Offset {
    Number(i64),
    Text(String),
}

impl Offset {
    /// The offset as a non-negative whole number, or `None` when it is not one.
    pub fn normalized(&self) -> Option<u64> {
        match self {
            Offset::Number(n) => u64::try_from(*n).ok(),
            Offset::Text(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
                s.parse().ok()
            }
            Offset::Text(_) => None,
        }
    }
}

impl From<i64> for Offset {
    fn from(n: i64) -> Self {
        Offset::Number(n)
    }
}

impl From<u32> for Offset {
    fn from(n: u32) -> Self {
        Offset::Number(i64::from(n))
    }
}

impl From<&str> for Offset {
    fn from(s: &str) -> Self {
        Offset::Text(s.to_string())
    }
}

impl From<String> for Offset {
    fn from(s: String) -> Self {
        Offset::Text(s)
    }
}

/// Account details for `register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub timezone: String,
}
