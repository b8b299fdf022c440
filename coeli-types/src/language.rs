//! Locale tags accepted by the API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A language the API can answer in.
///
/// Sent verbatim as both `Accept-Language` and `Content-Language`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Es,
    Ca,
    En,
    Fr,
}

impl Language {
    /// All supported languages.
    pub const ALL: [Language; 4] = [Language::Es, Language::Ca, Language::En, Language::Fr];

    /// Returns the two-letter tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::Ca => "ca",
            Language::En => "en",
            Language::Fr => "fr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" => Ok(Language::Es),
            "ca" => Ok(Language::Ca),
            "en" => Ok(Language::En),
            "fr" => Ok(Language::Fr),
            _ => Err(crate::Error::UnsupportedLanguage(s.to_string())),
        }
    }
}
