//! Country codes and language tags used to narrow geocoding queries.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PeregrinusTypesError;

/// ISO 3166-1 alpha-2 country code, always upper case (`DE`, `US`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TwoLetterCountryCode(String);

impl TwoLetterCountryCode {
    /// The code as upper case string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TwoLetterCountryCode {
    type Err = PeregrinusTypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 2 && s.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(s.to_ascii_uppercase()))
        } else {
            Err(PeregrinusTypesError::Conversion(format!(
                "country code must consist of two letters, got {s:?}"
            )))
        }
    }
}

impl TryFrom<String> for TwoLetterCountryCode {
    type Error = PeregrinusTypesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TwoLetterCountryCode> for String {
    fn from(value: TwoLetterCountryCode) -> Self {
        value.0
    }
}

impl Display for TwoLetterCountryCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Language tag like `de` or `en-US`: a two or three letter language with an optional two letter region.
///
/// The language is normalized to lower case and the region to upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageTag(String);

impl LanguageTag {
    /// The language part of the tag.
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    /// The region part of the tag, if any.
    pub fn region(&self) -> Option<&str> {
        self.0.split_once('-').map(|(_, region)| region)
    }

    /// The whole tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for LanguageTag {
    type Err = PeregrinusTypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PeregrinusTypesError::Conversion(format!("invalid language tag {s:?}"));

        let (language, region) = match s.split_once(['-', '_']) {
            Some((language, region)) => (language, Some(region)),
            None => (s, None),
        };

        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(invalid());
        }

        match region {
            None => Ok(Self(language.to_ascii_lowercase())),
            Some(region)
                if region.len() == 2 && region.chars().all(|c| c.is_ascii_alphabetic()) =>
            {
                Ok(Self(format!(
                    "{}-{}",
                    language.to_ascii_lowercase(),
                    region.to_ascii_uppercase()
                )))
            }
            Some(_) => Err(invalid()),
        }
    }
}

impl TryFrom<String> for LanguageTag {
    type Error = PeregrinusTypesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LanguageTag> for String {
    fn from(value: LanguageTag) -> Self {
        value.0
    }
}

impl Display for LanguageTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
