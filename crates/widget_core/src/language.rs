//! Supported language codes.
//!
//! The set is closed and configured at build time; it is never fetched from
//! the server.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A language the widget can attach to outbound requests.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Hi,
    Ta,
    Te,
    Kn,
    Mr,
    Gu,
    Bn,
}

impl Language {
    /// All supported languages, in the order the selector shows them.
    pub const ALL: [Language; 8] = [
        Language::En,
        Language::Hi,
        Language::Ta,
        Language::Te,
        Language::Kn,
        Language::Mr,
        Language::Gu,
        Language::Bn,
    ];

    /// The wire code sent in requests (`"en"`, `"hi"`, ...).
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Ta => "ta",
            Language::Te => "te",
            Language::Kn => "kn",
            Language::Mr => "mr",
            Language::Gu => "gu",
            Language::Bn => "bn",
        }
    }

    /// The short label shown in the language selector.
    pub fn label(&self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Hi => "हि",
            Language::Ta => "த",
            Language::Te => "తె",
            Language::Kn => "ಕ",
            Language::Mr => "म",
            Language::Gu => "ગુ",
            Language::Bn => "বা",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing a code outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl Display for UnknownLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown language code: {}", self.0)
    }
}

impl std::error::Error for UnknownLanguage {}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .iter()
            .copied()
            .find(|lang| lang.code() == s)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_from_str() {
        for lang in Language::ALL {
            assert_eq!(lang.code().parse::<Language>(), Ok(lang));
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = "fr".parse::<Language>().unwrap_err();
        assert_eq!(err, UnknownLanguage("fr".to_string()));
    }

    #[test]
    fn serde_uses_wire_codes() {
        assert_eq!(serde_json::to_string(&Language::Hi).unwrap(), "\"hi\"");
        let parsed: Language = serde_json::from_str("\"bn\"").unwrap();
        assert_eq!(parsed, Language::Bn);
    }

    #[test]
    fn default_is_english() {
        assert_eq!(Language::default(), Language::En);
    }
}
