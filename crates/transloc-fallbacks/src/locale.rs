//! Locale identifiers.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::FallbackError;

/// A language tag such as `en`, `en-US` or `zh-Hant-TW`.
///
/// Locales compare, hash and order by their normalized tag. Cloning is
/// cheap; the tag is shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale(Arc<str>);

impl Locale {
    /// Parse a locale tag (e.g., "en-US", "ja_JP").
    ///
    /// Surrounding whitespace is trimmed and `_` separators become `-`.
    /// Empty tags and tags with characters outside `[A-Za-z0-9-]` are
    /// rejected.
    pub fn new(tag: &str) -> Result<Self, FallbackError> {
        let tag = tag.trim().replace('_', "-");

        let valid = !tag.is_empty()
            && !tag.starts_with('-')
            && !tag.ends_with('-')
            && !tag.contains("--")
            && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');

        if !valid {
            return Err(FallbackError::InvalidLocale(tag));
        }

        Ok(Self(Arc::from(tag)))
    }

    /// Get the tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The tag with its last subtag removed.
    ///
    /// `en-US` -> `en`, `zh-Hant-TW` -> `zh-Hant`, `en` -> `None`.
    pub fn parent(&self) -> Option<Locale> {
        self.0
            .rfind('-')
            .map(|idx| Self(Arc::from(&self.0[..idx])))
    }

    /// This locale followed by each successive parent.
    pub fn ancestors(&self) -> Ancestors {
        Ancestors {
            next: Some(self.clone()),
        }
    }
}

/// Iterator returned by [`Locale::ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors {
    next: Option<Locale>,
}

impl Iterator for Ancestors {
    type Item = Locale;

    fn next(&mut self) -> Option<Locale> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Locale {
    type Err = FallbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Locale {
    type Error = FallbackError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(&raw).map_err(serde::de::Error::custom)
    }
}
