//! Plain output produced by the formatter.

use coeli_types::EntityMetadata;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

/// Rendition URLs of a media value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlainMedia {
    pub original: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<String>,
    pub public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// A formatted property value. Serializes to plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlainValue {
    Text(String),
    Bool(bool),
    Number(serde_json::Number),
    /// A primitive passed through unchanged that is neither text, bool nor number.
    Raw(serde_json::Value),
    Media(PlainMedia),
    List(Vec<PlainValue>),
    Map(BTreeMap<String, PlainValue>),
}

impl PlainValue {
    pub fn text(s: impl Into<String>) -> Self {
        PlainValue::Text(s.into())
    }

    pub fn empty() -> Self {
        PlainValue::Text(String::new())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PlainValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[PlainValue]> {
        match self {
            PlainValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, PlainValue>> {
        match self {
            PlainValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_media(&self) -> Option<&PlainMedia> {
        match self {
            PlainValue::Media(media) => Some(media),
            _ => None,
        }
    }
}

/// An entity after formatting: metadata untouched, properties plain.
///
/// Serializes as `{ "$metadata": ..., "<property>": ..., ... }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlainEntity {
    #[serde(rename = "$metadata")]
    pub metadata: EntityMetadata,
    #[serde(flatten)]
    pub properties: BTreeMap<String, PlainValue>,
}

impl PlainEntity {
    pub fn get(&self, name: &str) -> Option<&PlainValue> {
        self.properties.get(name)
    }

    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(PlainValue::as_text)
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    /// Looks up a value in the serialized entity with a JSON pointer
    /// (e.g. `"/author/name"`).
    pub fn pointer(&self, pointer: &str) -> Option<serde_json::Value> {
        self.to_json().ok()?.pointer(pointer).cloned()
    }

    /// Reads the serialized entity into a caller-defined type.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(self.to_json()?)
    }
}
