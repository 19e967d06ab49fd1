//! Configured fallback specifications and per-call fallback options.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::registry::{FallbackGenerator, LocaleFallbacks};
use crate::{FallbackError, Locale};

/// How a backend expands a requested locale into a chain.
///
/// Fixed when the backend is configured.
#[derive(Clone, Default)]
pub enum FallbackSpec {
    /// No fallback; the chain is the requested locale alone.
    #[default]
    None,
    /// Delegate to a fallback generator (usually a [`LocaleFallbacks`] registry).
    Default(Arc<dyn FallbackGenerator>),
    /// Each locale falls back to exactly one other locale.
    Custom(HashMap<Locale, Locale>),
}

impl FallbackSpec {
    /// The default spec backed by an empty [`LocaleFallbacks`] registry.
    pub fn default_registry() -> Self {
        Self::Default(Arc::new(LocaleFallbacks::new()))
    }

    /// The default spec backed by the given generator.
    pub fn generator(generator: impl FallbackGenerator + 'static) -> Self {
        Self::Default(Arc::new(generator))
    }

    /// Build a custom mapping, failing on the first malformed locale.
    pub fn custom<I, K, V>(pairs: I) -> Result<Self, FallbackError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mapping = pairs
            .into_iter()
            .map(|(from, to)| Ok((Locale::new(from.as_ref())?, Locale::new(to.as_ref())?)))
            .collect::<Result<HashMap<_, _>, FallbackError>>()?;
        Ok(Self::Custom(mapping))
    }

    /// Whether this spec can expand a locale at all.
    pub fn expands(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Fallback locales configured for a single locale, one hop only.
    pub(crate) fn lookup(&self, locale: &Locale) -> Vec<Locale> {
        match self {
            Self::None => Vec::new(),
            Self::Default(generator) => generator.fallbacks(locale),
            Self::Custom(mapping) => mapping.get(locale).cloned().into_iter().collect(),
        }
    }
}

impl fmt::Debug for FallbackSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Default(_) => f.write_str("Default(..)"),
            Self::Custom(mapping) => f.debug_tuple("Custom").field(mapping).finish(),
        }
    }
}

/// Per-call fallback choice, also used as an override value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FallbackOption {
    /// Use the configured spec.
    #[default]
    Default,
    /// Read the requested locale only.
    Disabled,
    /// Use the configured spec even where fallbacks would be off.
    Enabled,
    /// Read the requested locale, then this one.
    SingleLocale(Locale),
    /// Read the requested locale, then each of these in order.
    LocaleList(Vec<Locale>),
}

impl From<bool> for FallbackOption {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

impl From<Locale> for FallbackOption {
    fn from(locale: Locale) -> Self {
        Self::SingleLocale(locale)
    }
}

impl From<Vec<Locale>> for FallbackOption {
    fn from(locales: Vec<Locale>) -> Self {
        Self::LocaleList(locales)
    }
}

impl TryFrom<&Value> for FallbackOption {
    type Error = FallbackError;

    /// `null` -> default, `false`/`true` -> disabled/enabled, a string -> a
    /// single locale, an array -> a locale list. Null and empty entries in
    /// an array are skipped.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(Self::Default),
            Value::Bool(enabled) => Ok(Self::from(*enabled)),
            Value::String(tag) => Ok(Self::SingleLocale(Locale::new(tag)?)),
            Value::Array(entries) => {
                let mut locales = Vec::with_capacity(entries.len());
                for entry in entries {
                    match entry {
                        Value::Null => warn!("skipping null fallback locale"),
                        Value::String(tag) if tag.trim().is_empty() => {
                            warn!("skipping empty fallback locale")
                        }
                        Value::String(tag) => locales.push(Locale::new(tag)?),
                        other => return Err(FallbackError::InvalidOption(other.to_string())),
                    }
                }
                Ok(Self::LocaleList(locales))
            }
            other => Err(FallbackError::InvalidOption(other.to_string())),
        }
    }
}

impl TryFrom<Value> for FallbackOption {
    type Error = FallbackError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}
