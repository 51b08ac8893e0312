//! Loading a timeline from the widget's JSON data format:
//! `{ "groups": [{ "id", "content" }], "items": [{ "id", "start", "end", ... }] }`.
//!
//! Ids may be strings or numbers. Dates may be millisecond numbers or ISO 8601
//! strings. Items without an `end` are boxes with `end = start`.

use std::path::Path;

use log::warn;
use serde::Deserialize;
use serde_json::Value;

use crate::core::time::parse_date_millis;
use crate::timeline::item::{ItemData, ItemKind, TimelineItem};
use crate::timeline::timeline::{Group, Timeline};

/// Error type for loading timeline data from a file
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read timeline {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid timeline data: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimelineData {
    #[serde(default)]
    pub groups: Vec<GroupRecord>,
    #[serde(default)]
    pub items: Vec<ItemRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupRecord {
    pub id: Value,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemRecord {
    pub id: Value,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub group: Option<Value>,
    pub start: Value,
    #[serde(default)]
    pub end: Option<Value>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub selectable: Option<bool>,
    #[serde(rename = "className", default)]
    pub class_name: Option<String>,
}

/// Render a JSON id the way the widget keys it
pub(crate) fn id_string(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl ItemRecord {
    /// The id as the widget keys it
    pub fn item_id(&self) -> String {
        id_string(&self.id)
    }

    fn into_item(self) -> TimelineItem {
        let start = parse_date_millis(&self.start);
        let end = self.end.as_ref().map(parse_date_millis);
        let kind = match self.kind.as_deref() {
            None => {
                if end.is_some() {
                    ItemKind::Range
                } else {
                    ItemKind::Box
                }
            }
            Some(name) => ItemKind::from_name(name).unwrap_or_else(|| {
                warn!("Unknown item type '{}' for item {}, using range", name, id_string(&self.id));
                ItemKind::Range
            }),
        };

        let data = ItemData {
            start,
            end: end.unwrap_or(start),
            content: self.content,
            group: self.group.as_ref().map(id_string),
            kind,
            selectable: self.selectable.unwrap_or(true),
            class_name: self.class_name,
        };
        TimelineItem::new(id_string(&self.id), data)
    }
}

impl TimelineData {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::from_json_str(&json)?)
    }

    /// Build an in-memory timeline from the records.
    pub fn into_timeline(self) -> Timeline {
        let mut timeline = Timeline::new();
        timeline.groups = self
            .groups
            .into_iter()
            .map(|g| Group {
                id: id_string(&g.id),
                content: g.content,
            })
            .collect();
        for record in self.items {
            if let Some(old) = timeline.insert_item(record.into_item()) {
                warn!("Duplicate item id {}, keeping the last one", old.id);
            }
        }
        timeline
    }
}
