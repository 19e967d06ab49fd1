//! Configuration types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use transloc_backends::BackendKind;
use transloc_fallbacks::{
    FallbackError, FallbackReader, FallbackSpec, LocaleFallbacks, ValueSource, DEFAULT_MAX_DEPTH,
};

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslocConfig {
    /// Fallback mode for the attribute.
    pub fallbacks: FallbacksConfig,
    /// Default registry, used when `fallbacks: true`.
    pub registry: RegistryConfig,
    /// Maximum lookups while expanding a chain.
    pub max_depth: usize,
    /// Storage strategy.
    pub backend: BackendKind,
    /// Name of the translated attribute.
    pub attribute: String,
}

impl Default for TranslocConfig {
    fn default() -> Self {
        Self {
            fallbacks: FallbacksConfig::default(),
            registry: RegistryConfig::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            backend: BackendKind::default(),
            attribute: "title".to_string(),
        }
    }
}

impl TranslocConfig {
    /// Build the fallback spec this configuration describes.
    pub fn fallback_spec(&self) -> Result<FallbackSpec, FallbackError> {
        match &self.fallbacks {
            FallbacksConfig::Off | FallbacksConfig::Enabled(false) => Ok(FallbackSpec::None),
            FallbacksConfig::Enabled(true) => Ok(FallbackSpec::generator(self.registry.build()?)),
            FallbacksConfig::Custom(mapping) => FallbackSpec::custom(mapping),
        }
    }

    /// Wrap `source` in a reader using this configuration's spec and depth.
    pub fn reader<S: ValueSource>(&self, source: S) -> Result<FallbackReader<S>, FallbackError> {
        Ok(FallbackReader::new(source, self.fallback_spec()?).with_max_depth(self.max_depth))
    }

    /// Short description of the fallback mode.
    pub fn mode(&self) -> &'static str {
        match &self.fallbacks {
            FallbacksConfig::Off | FallbacksConfig::Enabled(false) => "none",
            FallbacksConfig::Enabled(true) => "default",
            FallbacksConfig::Custom(_) => "custom",
        }
    }
}

/// The `fallbacks` key: `null`/`false`, `true`, or a `locale: locale` mapping.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FallbacksConfig {
    /// Key absent or `null`.
    #[default]
    Off,
    /// `true` uses the registry, `false` disables fallbacks.
    Enabled(bool),
    /// Each locale falls back to exactly one other locale.
    Custom(BTreeMap<String, String>),
}

/// Locale fallbacks registry settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Locales appended to every chain.
    pub defaults: Vec<String>,
    /// Extra fallbacks per locale, tried after its parents.
    pub map: BTreeMap<String, Vec<String>>,
}

impl RegistryConfig {
    /// Build a [`LocaleFallbacks`] registry.
    pub fn build(&self) -> Result<LocaleFallbacks, FallbackError> {
        let mut registry = LocaleFallbacks::with_defaults(&self.defaults)?;
        for (locale, fallbacks) in &self.map {
            registry.map(locale, fallbacks)?;
        }
        Ok(registry)
    }
}
