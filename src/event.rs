//! Event records read from JSON input.

use crate::error::{CardError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

/// Placeholder the event scraper writes for fields it could not extract.
const NOT_FOUND: &str = "not found";

/// Prefix added in front of the location line.
const LOCATION_PIN: &str = "📍";

/// Displayable fields of one event.
///
/// Only `image` is required. Optional fields that are blank or carry the
/// scraper's `"not found"` placeholder deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Source image, either an `http(s)://` URL or a filesystem path
    pub image: String,

    #[serde(default)]
    pub title: String,

    /// Free-form date line, e.g. `"MERCREDI - 20H À 23H"`
    #[serde(default)]
    pub date: String,

    #[serde(default, deserialize_with = "present")]
    pub subtitle: Option<String>,

    /// Event category (`type` in the JSON input)
    #[serde(rename = "type", default, deserialize_with = "present")]
    pub event_type: Option<String>,

    #[serde(default, deserialize_with = "present")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "present")]
    pub description_short: Option<String>,

    #[serde(default, deserialize_with = "present")]
    pub description_long: Option<String>,

    #[serde(default, deserialize_with = "present")]
    pub cost: Option<String>,

    #[serde(default, deserialize_with = "present")]
    pub location: Option<String>,
}

impl EventRecord {
    /// Category line: the explicit type, or the subtitle when no type is set.
    pub fn category(&self) -> Option<&str> {
        self.event_type.as_deref().or(self.subtitle.as_deref())
    }

    /// Description used by the compact feed card.
    pub fn short_description(&self) -> Option<&str> {
        self.description_short
            .as_deref()
            .or(self.description.as_deref())
    }

    /// Description used by the tall story card.
    pub fn long_description(&self) -> Option<&str> {
        self.description_long
            .as_deref()
            .or(self.description.as_deref())
            .or(self.description_short.as_deref())
    }

    /// Location with a pin prefix, unless the input already carries one.
    pub fn location_line(&self) -> Option<String> {
        self.location.as_deref().map(|loc| {
            if loc.starts_with(LOCATION_PIN) {
                loc.to_string()
            } else {
                format!("{LOCATION_PIN} {loc}")
            }
        })
    }
}

fn present<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case(NOT_FOUND)))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EventInput {
    Many(Vec<EventRecord>),
    One(EventRecord),
}

/// Parses events from a JSON document holding one object or an array.
pub fn parse_events(json: &str) -> Result<Vec<EventRecord>> {
    let events = match serde_json::from_str::<EventInput>(json) {
        Ok(EventInput::Many(events)) => events,
        Ok(EventInput::One(event)) => vec![event],
        // Untagged errors are opaque; reparse with the concrete shape
        Err(_) if json.trim_start().starts_with('[') => {
            serde_json::from_str::<Vec<EventRecord>>(json)?
        }
        Err(_) => vec![serde_json::from_str::<EventRecord>(json)?],
    };
    Ok(events)
}

/// Reads and parses an events file.
pub fn load_events(path: &Path) -> Result<Vec<EventRecord>> {
    let json = fs::read_to_string(path).map_err(|e| CardError::io(path, e))?;
    let events = parse_events(&json)?;
    log::info!("Loaded {} event(s) from {}", events.len(), path.display());
    Ok(events)
}
