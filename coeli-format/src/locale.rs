//! Locale-aware number and date rendering.

use coeli_types::Language;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Renders numbers and calendar dates for a language.
pub trait LocaleFormat: Send + Sync {
    /// Renders `value` with exactly `fraction_digits` decimals and the
    /// language's digit grouping.
    fn format_number(&self, language: Language, value: f64, fraction_digits: usize) -> String;

    /// Renders a calendar date in the language's short numeric layout.
    fn format_date(&self, language: Language, year: i64, month: u32, day: u32) -> String;
}

/// CLDR-style rendering for `es`, `ca`, `en` and `fr`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLocale;

struct NumberSymbols {
    group: &'static str,
    decimal: char,
    /// Integer digits needed beyond the first group before grouping kicks in.
    min_grouping: usize,
}

impl NumberSymbols {
    fn for_language(language: Language) -> Self {
        match language {
            Language::En => Self { group: ",", decimal: '.', min_grouping: 1 },
            Language::Es => Self { group: ".", decimal: ',', min_grouping: 2 },
            Language::Ca => Self { group: ".", decimal: ',', min_grouping: 1 },
            // narrow no-break space
            Language::Fr => Self { group: "\u{202f}", decimal: ',', min_grouping: 1 },
        }
    }
}

fn group_digits(digits: &str, separator: &str, min_grouping: usize) -> String {
    if digits.len() < 3 + min_grouping {
        return digits.to_string();
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    let head = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - head) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

/// Fixed-point rendering of a non-negative value, midpoints rounded up.
fn round_half_away(value: f64, fraction_digits: usize) -> String {
    match (Decimal::from_f64(value), u32::try_from(fraction_digits)) {
        (Some(exact), Ok(dp)) if dp <= 28 => {
            let rounded = exact.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.*}", fraction_digits, rounded)
        }
        // beyond decimal range
        _ => format!("{:.*}", fraction_digits, value),
    }
}

impl LocaleFormat for BuiltinLocale {
    fn format_number(&self, language: Language, value: f64, fraction_digits: usize) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return if value > 0.0 { "∞".to_string() } else { "-∞".to_string() };
        }

        let symbols = NumberSymbols::for_language(language);
        let rendered = round_half_away(value.abs(), fraction_digits);
        let (int_part, frac_part) = match rendered.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (rendered.as_str(), None),
        };

        let mut out = String::new();
        if value < 0.0 && rendered.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
            out.push('-');
        }
        out.push_str(&group_digits(int_part, symbols.group, symbols.min_grouping));
        if let Some(frac) = frac_part {
            out.push(symbols.decimal);
            out.push_str(frac);
        }
        out
    }

    fn format_date(&self, language: Language, year: i64, month: u32, day: u32) -> String {
        match language {
            Language::En => format!("{month}/{day}/{year}"),
            Language::Es | Language::Ca => format!("{day}/{month}/{year}"),
            Language::Fr => format!("{day:02}/{month:02}/{year}"),
        }
    }
}
