//! Recursive value formatter.

use crate::date::{self, looks_like_iso_date, parse_iso_date, CalendarDate, DateStyle, DateTemplate};
use crate::locale::{BuiltinLocale, LocaleFormat};
use crate::plain::{PlainEntity, PlainMedia, PlainValue};
use coeli_types::{
    DatingFields, Embedded, Entity, Language, MediaKind, MediaValue, Primitive, Reference,
    ScalarValue, TypeMetadata, Value, ValueKind,
};
use serde_json::Value as Json;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use tracing::error;

const PERIOD_INTERVAL: &str = "PeriodInterval";
const DATING_INTERVAL: &str = "DatingInterval";
const CHRONOLOGICAL_PERIOD: &str = "ChronologicalPeriod";

/// Formats tagged entity values into plain data.
///
/// Stateless apart from the date templates derived once per language at
/// construction; safe to share across tasks.
#[derive(Clone)]
pub struct ValueFormatter {
    locale: Arc<dyn LocaleFormat>,
    templates: HashMap<Language, DateTemplate>,
}

impl ValueFormatter {
    /// Creates a formatter backed by [`BuiltinLocale`].
    pub fn new() -> Self {
        Self::with_locale(BuiltinLocale)
    }

    /// Creates a formatter backed by a custom locale implementation.
    pub fn with_locale(locale: impl LocaleFormat + 'static) -> Self {
        let locale: Arc<dyn LocaleFormat> = Arc::new(locale);
        let templates = Language::ALL
            .into_iter()
            .map(|lang| (lang, DateTemplate::derive(locale.as_ref(), lang)))
            .collect();
        Self { locale, templates }
    }

    /// The derived date layout for a language.
    pub fn date_template(&self, language: Language) -> DateTemplate {
        self.templates
            .get(&language)
            .cloned()
            .unwrap_or_else(|| DateTemplate::derive(self.locale.as_ref(), language))
    }

    /// Formats every property of `entity`; metadata is carried over as is.
    pub fn format_entity(&self, language: Language, entity: &Entity) -> PlainEntity {
        PlainEntity {
            metadata: entity.metadata.clone(),
            properties: self.format_properties(language, &entity.properties),
        }
    }

    /// Formats a single value.
    pub fn format_value(&self, language: Language, value: &Value) -> PlainValue {
        match value {
            Value::Null => PlainValue::empty(),
            Value::Repeated(repeated) => PlainValue::List(
                repeated
                    .values
                    .iter()
                    .map(|v| self.format_value(language, v))
                    .collect(),
            ),
            Value::Primitive(Primitive::Scalar(scalar)) => self.format_scalar(language, scalar),
            Value::Primitive(Primitive::Media(media)) => PlainValue::Media(plain_media(media)),
            Value::Illegal(illegal) => PlainValue::Text(format!("{} -> {}", illegal.value, illegal.cause)),
            Value::Reference(reference) => self.format_reference(language, reference),
            Value::Embedded(embedded) => self.format_embedded(language, embedded),
        }
    }

    /// Renders a full calendar date.
    pub fn format_date(&self, date: &CalendarDate, style: DateStyle) -> String {
        match style {
            DateStyle::Iso => date.iso(),
            DateStyle::Locale(language) => self.date_template(language).render(date),
        }
    }

    /// Renders a (possibly partial) dating.
    ///
    /// A `display` text wins. Otherwise the core is a full date, `MM/YYYY` or
    /// the bare year, wrapped in the uncertainty prefix and suffix.
    pub fn format_dating(&self, language: Language, dating: &DatingFields) -> String {
        if let Some(display) = dating.display.as_deref().filter(|d| !d.is_empty()) {
            return display.to_string();
        }
        let bc = dating.bc.unwrap_or(false);
        let year = dating.year.unwrap_or_default();
        let month = dating.month.filter(|m| *m != 0);
        let day = dating.day.filter(|d| *d != 0);

        let core = match (month, day) {
            (Some(month), Some(day)) => self.format_date(
                &CalendarDate { bc, year, month, day },
                DateStyle::Locale(language),
            ),
            (Some(month), None) => format!("{}/{}", date::pad(month, 2), date::year_text(bc, year)),
            _ => date::year_text(bc, year),
        };

        format!(
            "{}{}{}",
            dating.uncertainty_before.as_deref().unwrap_or_default(),
            core,
            dating.uncertainty_after.as_deref().unwrap_or_default()
        )
    }

    fn format_properties(
        &self,
        language: Language,
        properties: &BTreeMap<String, Value>,
    ) -> BTreeMap<String, PlainValue> {
        properties
            .iter()
            .map(|(name, value)| (name.clone(), self.format_value(language, value)))
            .collect()
    }

    fn format_scalar(&self, language: Language, scalar: &ScalarValue) -> PlainValue {
        let fraction_digits = match scalar.kind {
            ValueKind::Decimal => Some(2),
            ValueKind::Integral | ValueKind::AutoNumeric => Some(0),
            _ => None,
        };
        if let (Some(digits), Some(n)) = (fraction_digits, scalar.value.as_f64()) {
            let number = self.locale.format_number(language, n, digits);
            return PlainValue::Text(format!("{number}{}", scalar.unit.as_deref().unwrap_or_default()));
        }

        if is_dating(&scalar.dating) {
            return PlainValue::Text(self.format_dating(language, &scalar.dating));
        }

        if let Some(text) = scalar.value.as_str().filter(|t| looks_like_iso_date(t)) {
            return match parse_iso_date(text) {
                Some(date) => PlainValue::Text(self.format_date(&date, DateStyle::Locale(language))),
                None => {
                    error!("Date not in ISO format: {}", text);
                    PlainValue::Text(text.to_string())
                }
            };
        }

        match &scalar.value {
            Json::Null => PlainValue::empty(),
            Json::String(s) => PlainValue::Text(s.clone()),
            Json::Bool(b) => PlainValue::Bool(*b),
            Json::Number(n) => PlainValue::Number(n.clone()),
            other => PlainValue::Raw(other.clone()),
        }
    }

    fn format_reference(&self, language: Language, reference: &Reference) -> PlainValue {
        if let Some(text) = reference
            .metadata
            .as_ref()
            .and_then(|m| collapsed_label(m, &reference.properties))
        {
            return PlainValue::Text(text);
        }
        PlainValue::Map(self.format_properties(language, &reference.properties))
    }

    fn format_embedded(&self, language: Language, embedded: &Embedded) -> PlainValue {
        if let Some(text) = collapsed_label(&embedded.metadata, &embedded.properties) {
            return PlainValue::Text(text);
        }
        PlainValue::Map(self.format_properties(language, &embedded.properties))
    }
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ValueFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueFormatter")
            .field("templates", &self.templates)
            .finish_non_exhaustive()
    }
}

fn is_dating(dating: &DatingFields) -> bool {
    dating.year.is_some_and(|y| y != 0) && dating.bc.is_some()
}

/// Shapes rendered as a single label instead of a property map.
fn collapsed_label(metadata: &TypeMetadata, properties: &BTreeMap<String, Value>) -> Option<String> {
    match metadata.name.as_deref() {
        Some(PERIOD_INTERVAL) => {
            return Some(format!(
                "{} - {}",
                label_of(properties.get("since")),
                label_of(properties.get("until"))
            ));
        }
        Some(DATING_INTERVAL) => return Some(own_label(properties)),
        _ => {}
    }
    if metadata.references.as_deref() == Some(CHRONOLOGICAL_PERIOD) {
        return Some(own_label(properties));
    }
    None
}

fn own_label(properties: &BTreeMap<String, Value>) -> String {
    properties
        .get("label")
        .and_then(Value::as_text)
        .unwrap_or_default()
        .to_string()
}

fn label_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::Reference(r)) => own_label(&r.properties),
        Some(Value::Embedded(e)) => own_label(&e.properties),
        _ => String::new(),
    }
}

fn plain_media(media: &MediaValue) -> PlainMedia {
    let mut plain = PlainMedia {
        original: media.original.clone(),
        public: media.public,
        file_name: media.file_name.clone(),
        ..Default::default()
    };
    match media.kind {
        MediaKind::Image => {
            plain.large = media.large.clone();
            plain.medium = media.medium.clone();
            plain.small = media.small.clone();
        }
        MediaKind::Video | MediaKind::PublicVideoStream => {
            plain.thumbnail = media.thumbnail.clone();
            plain.small = media.small.clone();
            plain.medium = media.medium.clone();
            plain.stream = media.stream.clone();
        }
        MediaKind::Pdf => plain.small = media.small.clone(),
        MediaKind::Audio => {}
        MediaKind::Other => {
            plain.large = media.large.clone();
            plain.medium = media.medium.clone();
            plain.small = media.small.clone();
            plain.thumbnail = media.thumbnail.clone();
            plain.stream = media.stream.clone();
        }
    }
    plain
}
