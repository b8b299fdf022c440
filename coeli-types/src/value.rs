//! The tagged value union.
//!
//! Every property the API returns is one of six shapes. The server does not
//! send a single discriminant for all of them, so [`Value::from_json`] applies
//! an ordered set of checks:
//!
//! 1. JSON `null` is [`Value::Null`]; a bare array is a repeated value and a
//!    bare scalar an untyped primitive.
//! 2. An object carrying `original`, `public` and `mimeType` is media,
//!    classified by MIME prefix.
//! 3. `$metadata.$type.$type == "ValueType"` is a primitive.
//! 4. A non-null `cause` is an illegal value.
//! 5. A non-empty `href` is a reference.
//! 6. `$metadata.$type.$type == "EmbeddedType"` is an embedded object.
//! 7. A `values` array is a repeated value.
//! 8. An object with only a `value` (reference labels, mostly) is an untyped
//!    primitive.
//! 9. Anything else is null.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value as Json};
use std::collections::BTreeMap;
use std::fmt;

/// Key holding metadata on entities, references and embedded objects.
pub const METADATA_KEY: &str = "$metadata";

const TYPE_KEY: &str = "$type";
const VALUE_TYPE: &str = "ValueType";
const EMBEDDED_TYPE: &str = "EmbeddedType";
const IS_CALCULATED: &str = "isCalculated";

/// Returns true for keys that name a property rather than metadata.
///
/// Metadata keys start with `$`; `href` belongs to the reference itself.
pub fn is_property_key(key: &str) -> bool {
    !key.starts_with('$') && key != "href"
}

/// The declared type of a primitive value (`$metadata.$type.name`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Url,
    Token,
    TokenNl,
    LongString,
    Bool,
    Integral,
    Decimal,
    AutoNumeric,
    Dating,
    Date,
    Binary,
    /// No type metadata was sent.
    Untyped,
    Other(String),
}

impl ValueKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "URL" | "Url" => ValueKind::Url,
            "Token" => ValueKind::Token,
            "TokenNl" => ValueKind::TokenNl,
            "LongString" => ValueKind::LongString,
            "Bool" => ValueKind::Bool,
            "Integral" => ValueKind::Integral,
            "Decimal" => ValueKind::Decimal,
            "AutoNumeric" => ValueKind::AutoNumeric,
            "Dating" => ValueKind::Dating,
            "Date" => ValueKind::Date,
            "Binary" => ValueKind::Binary,
            other => ValueKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ValueKind::Url => "URL",
            ValueKind::Token => "Token",
            ValueKind::TokenNl => "TokenNl",
            ValueKind::LongString => "LongString",
            ValueKind::Bool => "Bool",
            ValueKind::Integral => "Integral",
            ValueKind::Decimal => "Decimal",
            ValueKind::AutoNumeric => "AutoNumeric",
            ValueKind::Dating => "Dating",
            ValueKind::Date => "Date",
            ValueKind::Binary => "Binary",
            ValueKind::Untyped => "",
            ValueKind::Other(name) => name,
        }
    }
}

/// Parts of a (possibly partial) historical date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatingFields {
    pub year: Option<i64>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub bc: Option<bool>,
    pub display: Option<String>,
    pub uncertainty_before: Option<String>,
    pub uncertainty_after: Option<String>,
    pub index_since: Option<String>,
    pub index_until: Option<String>,
}

const SCALAR_KEYS: [&str; 13] = [
    METADATA_KEY,
    "value",
    "year",
    "month",
    "day",
    "bc",
    "display",
    "uncertaintyBefore",
    "uncertaintyAfter",
    "indexSince",
    "indexUntil",
    "numDecimals",
    IS_CALCULATED,
];

/// A scalar primitive: text, number, boolean or date-like value.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarValue {
    pub kind: ValueKind,
    pub unit: Option<String>,
    pub value: Json,
    pub dating: DatingFields,
    pub num_decimals: Option<u32>,
    pub is_calculated: Option<bool>,
    /// Fields the model does not name, kept so the value round-trips.
    pub extra: Map<String, Json>,
}

impl ScalarValue {
    pub fn new(kind: ValueKind, value: impl Into<Json>) -> Self {
        Self {
            kind,
            unit: None,
            value: value.into(),
            dating: DatingFields::default(),
            num_decimals: None,
            is_calculated: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    #[must_use]
    pub fn with_dating(mut self, dating: DatingFields) -> Self {
        self.dating = dating;
        self
    }

    /// Returns the value as text if it is a JSON string.
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_str()
    }

    fn from_object(obj: &Map<String, Json>) -> Self {
        let descriptor = type_descriptor(obj);
        let kind = descriptor
            .and_then(|d| d.get("name"))
            .and_then(Json::as_str)
            .map_or(ValueKind::Untyped, ValueKind::from_name);
        let unit = descriptor
            .and_then(|d| d.get("unit"))
            .and_then(Json::as_str)
            .map(str::to_string);

        let dating = DatingFields {
            year: obj.get("year").and_then(as_integer),
            month: obj.get("month").and_then(as_integer).and_then(|m| u32::try_from(m).ok()),
            day: obj.get("day").and_then(as_integer).and_then(|d| u32::try_from(d).ok()),
            bc: obj.get("bc").and_then(Json::as_bool),
            display: string_field(obj, "display"),
            uncertainty_before: string_field(obj, "uncertaintyBefore"),
            uncertainty_after: string_field(obj, "uncertaintyAfter"),
            index_since: inner_text(obj.get("indexSince")),
            index_until: inner_text(obj.get("indexUntil")),
        };

        let extra = obj
            .iter()
            .filter(|(k, _)| !SCALAR_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Self {
            kind,
            unit,
            value: obj.get("value").cloned().unwrap_or(Json::Null),
            dating,
            num_decimals: obj
                .get("numDecimals")
                .and_then(Json::as_u64)
                .and_then(|n| u32::try_from(n).ok()),
            is_calculated: obj.get(IS_CALCULATED).and_then(Json::as_bool),
            extra,
        }
    }

    fn to_json(&self) -> Json {
        let mut obj = self.extra.clone();
        if self.kind != ValueKind::Untyped {
            let mut descriptor = Map::new();
            descriptor.insert(TYPE_KEY.into(), VALUE_TYPE.into());
            descriptor.insert("name".into(), self.kind.as_str().into());
            if let Some(unit) = &self.unit {
                descriptor.insert("unit".into(), unit.as_str().into());
            }
            let mut metadata = Map::new();
            metadata.insert(TYPE_KEY.into(), Json::Object(descriptor));
            obj.insert(METADATA_KEY.into(), Json::Object(metadata));
        }
        obj.insert("value".into(), self.value.clone());

        let d = &self.dating;
        insert_opt(&mut obj, "year", d.year);
        insert_opt(&mut obj, "month", d.month);
        insert_opt(&mut obj, "day", d.day);
        insert_opt(&mut obj, "bc", d.bc);
        insert_opt(&mut obj, "display", d.display.clone());
        insert_opt(&mut obj, "uncertaintyBefore", d.uncertainty_before.clone());
        insert_opt(&mut obj, "uncertaintyAfter", d.uncertainty_after.clone());
        insert_opt(&mut obj, "indexSince", d.index_since.clone().map(wrap));
        insert_opt(&mut obj, "indexUntil", d.index_until.clone().map(wrap));
        insert_opt(&mut obj, "numDecimals", self.num_decimals);
        insert_opt(&mut obj, IS_CALCULATED, self.is_calculated);
        Json::Object(obj)
    }
}

/// Media family, derived from the MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
    /// A video whose stream URL is publicly reachable.
    PublicVideoStream,
    Pdf,
    Audio,
    Other,
}

impl MediaKind {
    fn classify(mime_type: &str, stream: Option<&str>) -> Self {
        if mime_type.starts_with("image/") {
            MediaKind::Image
        } else if mime_type.starts_with("video/") {
            if stream.is_some_and(|s| s.contains("public")) {
                MediaKind::PublicVideoStream
            } else {
                MediaKind::Video
            }
        } else if mime_type == "application/pdf" {
            MediaKind::Pdf
        } else if mime_type.starts_with("audio/") {
            MediaKind::Audio
        } else {
            MediaKind::Other
        }
    }
}

/// An uploaded file with its rendition URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaValue {
    pub kind: MediaKind,
    pub mime_type: String,
    pub original: String,
    pub public: bool,
    pub file_name: Option<String>,
    pub large: Option<String>,
    pub medium: Option<String>,
    pub small: Option<String>,
    pub thumbnail: Option<String>,
    pub stream: Option<String>,
    pub is_calculated: Option<bool>,
}

impl MediaValue {
    fn from_object(obj: &Map<String, Json>) -> Option<Self> {
        let present = |key: &str| obj.get(key).is_some_and(|v| !v.is_null());
        if !(present("original") && present("public") && present("mimeType")) {
            return None;
        }
        let mime_type = inner_text(obj.get("mimeType")).unwrap_or_default();
        let stream = inner_text(obj.get("stream"));
        Some(Self {
            kind: MediaKind::classify(&mime_type, stream.as_deref()),
            mime_type,
            original: inner_text(obj.get("original")).unwrap_or_default(),
            public: obj
                .get("public")
                .and_then(|p| p.get("value"))
                .and_then(Json::as_bool)
                .unwrap_or(false),
            file_name: inner_text(obj.get("fileName")),
            large: inner_text(obj.get("large")),
            medium: inner_text(obj.get("medium")),
            small: inner_text(obj.get("small")),
            thumbnail: inner_text(obj.get("thumbnail")),
            stream,
            is_calculated: obj.get(IS_CALCULATED).and_then(Json::as_bool),
        })
    }

    fn to_json(&self) -> Json {
        let mut obj = Map::new();
        obj.insert("original".into(), wrap(self.original.clone()));
        obj.insert("public".into(), wrap(self.public));
        obj.insert("mimeType".into(), wrap(self.mime_type.clone()));
        insert_opt(&mut obj, "fileName", self.file_name.clone().map(wrap));
        insert_opt(&mut obj, "large", self.large.clone().map(wrap));
        insert_opt(&mut obj, "medium", self.medium.clone().map(wrap));
        insert_opt(&mut obj, "small", self.small.clone().map(wrap));
        insert_opt(&mut obj, "thumbnail", self.thumbnail.clone().map(wrap));
        insert_opt(&mut obj, "stream", self.stream.clone().map(wrap));
        insert_opt(&mut obj, IS_CALCULATED, self.is_calculated);
        Json::Object(obj)
    }
}

/// A primitive value: either a scalar or media.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Scalar(ScalarValue),
    Media(MediaValue),
}

/// The `$metadata` of a reference or embedded object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeMetadata {
    /// `$type.$type`, e.g. `EmbeddedType`.
    pub kind: Option<String>,
    /// `$type.name`, e.g. `PeriodInterval`.
    pub name: Option<String>,
    /// `$type.references`: the entity type a reference points at.
    pub references: Option<String>,
    pub id: Option<String>,
}

impl TypeMetadata {
    pub fn embedded(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: Some(EMBEDDED_TYPE.to_string()),
            name: Some(name.into()),
            references: None,
            id: Some(id.into()),
        }
    }

    pub fn reference_to(entity_type: impl Into<String>) -> Self {
        Self {
            kind: Some("ReferenceType".to_string()),
            name: None,
            references: Some(entity_type.into()),
            id: None,
        }
    }

    fn from_json(json: &Json) -> Self {
        let descriptor = json.get(TYPE_KEY);
        let field = |key: &str| {
            descriptor
                .and_then(|d| d.get(key))
                .and_then(Json::as_str)
                .map(str::to_string)
        };
        Self {
            kind: field(TYPE_KEY),
            name: field("name"),
            references: field("references"),
            id: json.get("id").and_then(Json::as_str).map(str::to_string),
        }
    }

    fn to_json(&self) -> Json {
        let mut descriptor = Map::new();
        insert_opt(&mut descriptor, TYPE_KEY, self.kind.clone());
        insert_opt(&mut descriptor, "name", self.name.clone());
        insert_opt(&mut descriptor, "references", self.references.clone());
        let mut obj = Map::new();
        obj.insert(TYPE_KEY.into(), Json::Object(descriptor));
        insert_opt(&mut obj, "id", self.id.clone());
        Json::Object(obj)
    }
}

/// A link to another entity, carrying whatever properties the server inlined.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reference {
    pub href: String,
    pub metadata: Option<TypeMetadata>,
    pub properties: BTreeMap<String, Value>,
    pub is_calculated: Option<bool>,
}

impl Reference {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.properties.insert(
            "label".to_string(),
            Value::Primitive(Primitive::Scalar(ScalarValue::new(
                ValueKind::Token,
                label.into(),
            ))),
        );
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: TypeMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Text of the `label` property, if present.
    pub fn label(&self) -> Option<&str> {
        self.properties.get("label").and_then(Value::as_text)
    }

    /// Reads a reference from any JSON object, whatever else it carries.
    pub fn from_json(json: &Json) -> Self {
        let Some(obj) = json.as_object() else {
            return Self::default();
        };
        Self {
            href: obj
                .get("href")
                .and_then(Json::as_str)
                .unwrap_or_default()
                .to_string(),
            metadata: obj.get(METADATA_KEY).map(TypeMetadata::from_json),
            properties: properties_of(obj),
            is_calculated: obj.get(IS_CALCULATED).and_then(Json::as_bool),
        }
    }

    pub fn to_json(&self) -> Json {
        let mut obj = properties_to_json(&self.properties);
        obj.insert("href".into(), self.href.clone().into());
        if let Some(metadata) = &self.metadata {
            obj.insert(METADATA_KEY.into(), metadata.to_json());
        }
        insert_opt(&mut obj, IS_CALCULATED, self.is_calculated);
        Json::Object(obj)
    }
}

impl Serialize for Reference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Json::deserialize(deserializer).map(|json| Reference::from_json(&json))
    }
}

/// An inline sub-object with its own named properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Embedded {
    pub metadata: TypeMetadata,
    pub properties: BTreeMap<String, Value>,
    pub is_calculated: Option<bool>,
}

impl Embedded {
    pub fn new(metadata: TypeMetadata) -> Self {
        Self {
            metadata,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// The embedded type name, e.g. `PeriodInterval`.
    pub fn type_name(&self) -> Option<&str> {
        self.metadata.name.as_deref()
    }

    fn to_json(&self) -> Json {
        let mut obj = properties_to_json(&self.properties);
        obj.insert(METADATA_KEY.into(), self.metadata.to_json());
        insert_opt(&mut obj, IS_CALCULATED, self.is_calculated);
        Json::Object(obj)
    }
}

/// Why the server could not resolve a value.
#[derive(Debug, Clone, PartialEq)]
pub enum IllegalCause {
    /// The server found a reference cycle and cut it.
    CycleReference { references: Vec<Reference> },
    Other(Json),
}

impl IllegalCause {
    fn from_json(json: &Json) -> Self {
        match json.get("references").and_then(Json::as_array) {
            Some(refs) => IllegalCause::CycleReference {
                references: refs.iter().map(Reference::from_json).collect(),
            },
            None => IllegalCause::Other(json.clone()),
        }
    }

    pub fn to_json(&self) -> Json {
        match self {
            IllegalCause::CycleReference { references } => {
                let refs = references.iter().map(Reference::to_json).collect();
                let mut obj = Map::new();
                obj.insert("references".into(), Json::Array(refs));
                Json::Object(obj)
            }
            IllegalCause::Other(json) => json.clone(),
        }
    }
}

impl fmt::Display for IllegalCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalCause::Other(Json::String(s)) => f.write_str(s),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

/// A value the server flagged instead of resolving.
#[derive(Debug, Clone, PartialEq)]
pub struct IllegalValue {
    pub value: String,
    pub rang: Option<String>,
    pub cause: IllegalCause,
    pub is_calculated: Option<bool>,
}

impl IllegalValue {
    pub fn is_cycle(&self) -> bool {
        matches!(self.cause, IllegalCause::CycleReference { .. })
    }

    fn from_object(obj: &Map<String, Json>) -> Self {
        Self {
            value: obj.get("value").map(text_of).unwrap_or_default(),
            rang: string_field(obj, "rang"),
            cause: obj
                .get("cause")
                .map_or(IllegalCause::Other(Json::Null), IllegalCause::from_json),
            is_calculated: obj.get(IS_CALCULATED).and_then(Json::as_bool),
        }
    }

    fn to_json(&self) -> Json {
        let mut obj = Map::new();
        obj.insert("value".into(), self.value.clone().into());
        insert_opt(&mut obj, "rang", self.rang.clone());
        obj.insert("cause".into(), self.cause.to_json());
        insert_opt(&mut obj, IS_CALCULATED, self.is_calculated);
        Json::Object(obj)
    }
}

/// An ordered sequence of values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepeatedValue {
    pub values: Vec<Value>,
    pub is_calculated: Option<bool>,
}

/// A property value as the API sends it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Primitive(Primitive),
    Illegal(IllegalValue),
    Reference(Reference),
    Embedded(Embedded),
    Repeated(RepeatedValue),
}

impl Value {
    /// Classifies a raw JSON payload. Never fails: unknown shapes are null.
    pub fn from_json(json: &Json) -> Self {
        match json {
            Json::Null => Value::Null,
            Json::Array(items) => Value::Repeated(RepeatedValue {
                values: items.iter().map(Value::from_json).collect(),
                is_calculated: None,
            }),
            Json::Object(obj) => Self::from_object(obj),
            scalar => Value::scalar(ValueKind::Untyped, scalar.clone()),
        }
    }

    fn from_object(obj: &Map<String, Json>) -> Self {
        if let Some(media) = MediaValue::from_object(obj) {
            return Value::Primitive(Primitive::Media(media));
        }
        let descriptor_kind = type_descriptor(obj)
            .and_then(|d| d.get(TYPE_KEY))
            .and_then(Json::as_str);
        if descriptor_kind == Some(VALUE_TYPE) {
            return Value::Primitive(Primitive::Scalar(ScalarValue::from_object(obj)));
        }
        if obj.get("cause").is_some_and(|c| !c.is_null()) {
            return Value::Illegal(IllegalValue::from_object(obj));
        }
        if obj
            .get("href")
            .and_then(Json::as_str)
            .is_some_and(|h| !h.is_empty())
        {
            return Value::Reference(Reference::from_json(&Json::Object(obj.clone())));
        }
        if descriptor_kind == Some(EMBEDDED_TYPE) {
            return Value::Embedded(Embedded {
                metadata: obj
                    .get(METADATA_KEY)
                    .map(TypeMetadata::from_json)
                    .unwrap_or_default(),
                properties: properties_of(obj),
                is_calculated: obj.get(IS_CALCULATED).and_then(Json::as_bool),
            });
        }
        if let Some(Json::Array(values)) = obj.get("values") {
            return Value::Repeated(RepeatedValue {
                values: values.iter().map(Value::from_json).collect(),
                is_calculated: obj.get(IS_CALCULATED).and_then(Json::as_bool),
            });
        }
        if obj.contains_key("value") {
            return Value::Primitive(Primitive::Scalar(ScalarValue::from_object(obj)));
        }
        Value::Null
    }

    /// Shorthand for a scalar primitive.
    pub fn scalar(kind: ValueKind, value: impl Into<Json>) -> Self {
        Value::Primitive(Primitive::Scalar(ScalarValue::new(kind, value)))
    }

    /// Shorthand for a repeated value.
    pub fn repeated(values: Vec<Value>) -> Self {
        Value::Repeated(RepeatedValue {
            values,
            is_calculated: None,
        })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The `isCalculated` flag, when the server sent one.
    pub fn is_calculated(&self) -> Option<bool> {
        match self {
            Value::Null => None,
            Value::Primitive(Primitive::Scalar(s)) => s.is_calculated,
            Value::Primitive(Primitive::Media(m)) => m.is_calculated,
            Value::Illegal(i) => i.is_calculated,
            Value::Reference(r) => r.is_calculated,
            Value::Embedded(e) => e.is_calculated,
            Value::Repeated(r) => r.is_calculated,
        }
    }

    /// The raw text of a scalar string value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Primitive(Primitive::Scalar(s)) => s.as_text(),
            _ => None,
        }
    }

    /// Converts back to the wire shape.
    pub fn to_json(&self) -> Json {
        match self {
            Value::Null => Json::Null,
            Value::Primitive(Primitive::Scalar(s)) => s.to_json(),
            Value::Primitive(Primitive::Media(m)) => m.to_json(),
            Value::Illegal(i) => i.to_json(),
            Value::Reference(r) => r.to_json(),
            Value::Embedded(e) => e.to_json(),
            Value::Repeated(r) => {
                let mut obj = Map::new();
                obj.insert(
                    "values".into(),
                    Json::Array(r.values.iter().map(Value::to_json).collect()),
                );
                insert_opt(&mut obj, IS_CALCULATED, r.is_calculated);
                Json::Object(obj)
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Json::deserialize(deserializer).map(|json| Value::from_json(&json))
    }
}

pub(crate) fn properties_of(obj: &Map<String, Json>) -> BTreeMap<String, Value> {
    obj.iter()
        .filter(|(k, _)| is_property_key(k) && k.as_str() != IS_CALCULATED)
        .map(|(k, v)| (k.clone(), Value::from_json(v)))
        .collect()
}

pub(crate) fn properties_to_json(properties: &BTreeMap<String, Value>) -> Map<String, Json> {
    properties
        .iter()
        .map(|(k, v)| (k.clone(), v.to_json()))
        .collect()
}

fn type_descriptor(obj: &Map<String, Json>) -> Option<&Map<String, Json>> {
    obj.get(METADATA_KEY)?.get(TYPE_KEY)?.as_object()
}

fn string_field(obj: &Map<String, Json>, key: &str) -> Option<String> {
    obj.get(key).and_then(Json::as_str).map(str::to_string)
}

/// Reads `{ "value": "..." }`.
fn inner_text(json: Option<&Json>) -> Option<String> {
    json?.get("value").and_then(Json::as_str).map(str::to_string)
}

fn as_integer(json: &Json) -> Option<i64> {
    json.as_i64().or_else(|| json.as_f64().map(|f| f as i64))
}

fn text_of(json: &Json) -> String {
    match json {
        Json::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn wrap(value: impl Into<Json>) -> Json {
    let mut obj = Map::new();
    obj.insert("value".into(), value.into());
    Json::Object(obj)
}

fn insert_opt<T: Into<Json>>(obj: &mut Map<String, Json>, key: &str, value: Option<T>) {
    if let Some(v) = value {
        obj.insert(key.to_string(), v.into());
    }
}
