use crate::value::{is_property_key, properties_to_json, Reference, Value, METADATA_KEY};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value as Json};
use std::collections::BTreeMap;

/// `$metadata.$type` of an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    #[serde(rename = "$type", default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
}

/// How many entities of a type point at this one through a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseReference {
    pub entity_name: String,
    pub property_name: String,
    pub count: u64,
}

/// Server-maintained metadata of an entity.
///
/// Fields the model does not name land in `extra` and serialize back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMetadata {
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_ref: Option<Reference>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(rename = "$type", default)]
    pub type_descriptor: TypeDescriptor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_by: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(default)]
    pub reverse_references: Vec<ReverseReference>,
    #[serde(default)]
    pub pending_to_validate: bool,
    #[serde(default)]
    pub id_in_source: String,
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub record_lists: Vec<Json>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Json>,
}

impl EntityMetadata {
    /// The entity type name (`$type.name`).
    pub fn type_name(&self) -> &str {
        &self.type_descriptor.name
    }

    /// The canonical URL of the entity, if the server sent one.
    pub fn href(&self) -> Option<&str> {
        self.self_ref.as_ref().map(|r| r.href.as_str())
    }

    /// Reverse-reference count for one (entity, property) pair.
    pub fn reverse_reference_count(&self, entity_name: &str, property_name: &str) -> u64 {
        self.reverse_references
            .iter()
            .filter(|r| r.entity_name == entity_name && r.property_name == property_name)
            .map(|r| r.count)
            .sum()
    }
}

/// A server-managed record: metadata plus named property values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entity {
    pub metadata: EntityMetadata,
    pub properties: BTreeMap<String, Value>,
}

impl Entity {
    pub fn new(metadata: EntityMetadata) -> Self {
        Self {
            metadata,
            properties: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Parses the raw entity JSON the API returns.
    pub fn from_json(json: &Json) -> crate::Result<Self> {
        let obj = json
            .as_object()
            .ok_or_else(|| crate::Error::InvalidEntity("expected a JSON object".to_string()))?;
        let metadata = match obj.get(METADATA_KEY) {
            Some(raw) => serde_json::from_value(raw.clone())?,
            None => EntityMetadata::default(),
        };
        Ok(Self {
            metadata,
            properties: obj
                .iter()
                .filter(|(k, _)| is_property_key(k))
                .map(|(k, v)| (k.clone(), Value::from_json(v)))
                .collect(),
        })
    }

    pub fn to_json(&self) -> crate::Result<Json> {
        let mut obj: Map<String, Json> = properties_to_json(&self.properties);
        obj.insert(METADATA_KEY.into(), serde_json::to_value(&self.metadata)?);
        Ok(Json::Object(obj))
    }
}

impl Serialize for Entity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Entity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = Json::deserialize(deserializer)?;
        Entity::from_json(&json).map_err(serde::de::Error::custom)
    }
}
