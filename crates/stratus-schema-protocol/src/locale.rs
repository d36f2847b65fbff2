use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_HELP_LOCALE;
use crate::errors::{Error, Result};

/// A language code keying localized help text, e.g. `en`, `jp`, `ko`.
///
/// Codes are two lowercase ASCII letters. Documents carrying anything else
/// are rejected at parse time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self(DEFAULT_HELP_LOCALE.to_string())
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(code: &str) -> Result<Self> {
        let valid = code.len() == 2 && code.chars().all(|ch| ch.is_ascii_lowercase());
        if !valid {
            return Err(Error::InvalidLocale(code.to_string()));
        }
        Ok(Self(code.to_string()))
    }
}

impl TryFrom<String> for Locale {
    type Error = Error;

    fn try_from(code: String) -> Result<Self> {
        code.parse()
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::Locale;

    #[test]
    fn accepts_two_letter_codes() {
        for code in ["en", "jp", "ko", "de"] {
            let locale = code.parse::<Locale>().expect("valid locale rejected");
            assert_eq!(locale.as_str(), code);
        }
    }

    #[test]
    fn rejects_malformed_codes() {
        for code in ["", "e", "eng", "EN", "e1", "en-US"] {
            assert!(code.parse::<Locale>().is_err(), "accepted bad code {code}");
        }
    }

    #[test]
    fn default_is_english() {
        assert_eq!(Locale::default().as_str(), "en");
    }
}
