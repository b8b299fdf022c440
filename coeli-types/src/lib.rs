//! Wire model for the Coeli content-repository API.
//!
//! The API wraps every property in a metadata envelope. This crate turns
//! those envelopes into an explicit tagged union at the boundary so that
//! nothing downstream has to sniff raw JSON:
//! - [`Value`]: primitive, reference, embedded, illegal, repeated or null
//! - [`Entity`]: typed [`EntityMetadata`] plus named property values
//! - [`ControlledSearch`] and friends: the persisted search model, pages,
//!   facets and response envelopes
//! - [`Language`]: the locale tags the API accepts
//!
//! Classification happens once, in [`Value::from_json`]; see its docs for the
//! precedence applied to shapes that carry more than one marker.

mod entity;
mod language;
mod search;
mod value;

pub use entity::{Entity, EntityMetadata, ReverseReference, TypeDescriptor};
pub use language::Language;
pub use search::{
    ChronoUnit, ConditionValue, ControlledSearch, ControlledSearchCondition,
    ControlledSearchResponse, Facet, FacetMode, FacetValue, Facets, GetResponse,
    GetSearchResponse, Link, Operator, Order, Page, SortConditions, SortField, TimeSearchValue,
    TimeSpan, TimeSpanBound, TimeSpanInterval, WithValue, ALL_ITEMS_PAGE_LIMIT,
    DEFAULT_PAGE_LIMIT,
};
pub use value::{
    is_property_key, DatingFields, Embedded, IllegalCause, IllegalValue, MediaKind, MediaValue,
    Primitive, Reference, RepeatedValue, ScalarValue, TypeMetadata, Value, ValueKind,
    METADATA_KEY,
};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading the wire model.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("invalid entity: {0}")]
    InvalidEntity(String),
}
