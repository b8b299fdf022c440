//! Calendar dates, ISO parsing and locale date templates.

use crate::locale::LocaleFormat;
use coeli_types::Language;
use regex::Regex;
use std::sync::LazyLock;

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?\d{4})-(\d{2})-(\d{2})$").expect("static ISO date pattern")
});

const YEAR_SLOT: &str = "{year}";
const MONTH_SLOT: &str = "{month}";
const DAY_SLOT: &str = "{day}";

/// Target layout for a full calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `YYYY-MM-DD`, with a leading `-` for BC years.
    Iso,
    Locale(Language),
}

/// A day in the proleptic calendar; `year` is always positive, `bc` carries the era.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate {
    pub bc: bool,
    pub year: i64,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    /// Zero-padded year with the era sign, e.g. `-0044`.
    pub fn year_text(&self) -> String {
        year_text(self.bc, self.year)
    }

    pub fn iso(&self) -> String {
        format!("{}-{}-{}", self.year_text(), pad(self.month, 2), pad(self.day, 2))
    }
}

pub(crate) fn year_text(bc: bool, year: i64) -> String {
    format!("{}{}", if bc { "-" } else { "" }, pad(year, 4))
}

pub(crate) fn pad(n: impl ToString, width: usize) -> String {
    format!("{:0>width$}", n.to_string())
}

/// True when `text` has the `[-]YYYY-MM-DD` shape.
pub fn looks_like_iso_date(text: &str) -> bool {
    ISO_DATE.is_match(text)
}

/// Parses `[-]YYYY-MM-DD`. Returns `None` when the shape or the month/day
/// ranges are wrong.
pub fn parse_iso_date(text: &str) -> Option<CalendarDate> {
    let caps = ISO_DATE.captures(text)?;
    let year: i64 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some(CalendarDate {
        bc: year < 0,
        year: year.abs(),
        month,
        day,
    })
}

/// A locale's date layout with slots for year, month and day.
///
/// Derived by rendering 13 June 2000 through the locale and swapping the
/// three known tokens for slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTemplate(String);

impl DateTemplate {
    pub fn derive(locale: &dyn LocaleFormat, language: Language) -> Self {
        let reference = locale.format_date(language, 2000, 6, 13);
        let template = reference.replacen("2000", YEAR_SLOT, 1);
        // month may come padded ("06") or bare ("6")
        let template = if template.contains("06") {
            template.replacen("06", MONTH_SLOT, 1)
        } else {
            template.replacen('6', MONTH_SLOT, 1)
        };
        Self(template.replacen("13", DAY_SLOT, 1))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fills the slots with zero-padded values.
    pub fn render(&self, date: &CalendarDate) -> String {
        self.0
            .replacen(YEAR_SLOT, &date.year_text(), 1)
            .replacen(MONTH_SLOT, &pad(date.month, 2), 1)
            .replacen(DAY_SLOT, &pad(date.day, 2), 1)
    }
}
