//! Value formatting for Coeli entities.
//!
//! [`ValueFormatter`] walks an [`Entity`](coeli_types::Entity) and replaces
//! every tagged property value with plain data:
//! - numbers are rendered with locale grouping and their unit appended
//! - datings and ISO dates go through the locale's short date layout
//! - media become a record of rendition URLs
//! - period/dating intervals and chronological periods collapse to labels
//! - any other reference or embedded object is formatted recursively
//!
//! Locale rendering itself is a capability ([`LocaleFormat`]); a built-in
//! implementation covers the four languages the API speaks.

mod date;
mod formatter;
mod locale;
mod plain;

pub use date::{looks_like_iso_date, parse_iso_date, CalendarDate, DateStyle, DateTemplate};
pub use formatter::ValueFormatter;
pub use locale::{BuiltinLocale, LocaleFormat};
pub use plain::{PlainEntity, PlainMedia, PlainValue};
