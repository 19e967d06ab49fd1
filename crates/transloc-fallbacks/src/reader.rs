//! Fallback-aware reads against a value source.

use serde_json::Value;
use tracing::{debug, trace};

use crate::chain::{LocaleChain, DEFAULT_MAX_DEPTH};
use crate::context::current_override;
use crate::source::{is_usable, Options, ValueSource};
use crate::{FallbackError, FallbackOption, FallbackSpec, Locale};

/// Option key carrying the per-call fallback choice.
pub const FALLBACK_KEY: &str = "fallback";

/// Options for a single read: the fallback choice plus pass-through keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadOptions {
    /// Per-call fallback choice; `None` means [`FallbackOption::Default`].
    pub fallback: Option<FallbackOption>,
    /// Forwarded unchanged to every source read.
    pub passthrough: Options,
}

impl ReadOptions {
    /// Options with no fallback choice and no pass-through keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback choice.
    pub fn fallback(mut self, option: impl Into<FallbackOption>) -> Self {
        self.fallback = Some(option.into());
        self
    }

    /// Add a pass-through key.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.passthrough.insert(key.into(), value.into());
        self
    }

    /// Split a raw option map into the fallback choice and the rest.
    ///
    /// `map` is only read; the `fallback` entry is copied out.
    pub fn from_map(map: &Options) -> Result<Self, FallbackError> {
        let fallback = map
            .get(FALLBACK_KEY)
            .map(FallbackOption::try_from)
            .transpose()?;
        let passthrough = map
            .iter()
            .filter(|(key, _)| key.as_str() != FALLBACK_KEY)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(Self {
            fallback,
            passthrough,
        })
    }

    /// The effective per-call option.
    pub fn fallback_option(&self) -> FallbackOption {
        self.fallback.clone().unwrap_or_default()
    }
}

/// Reads an attribute through a locale fallback chain.
///
/// ```
/// use std::collections::BTreeMap;
/// use serde_json::{json, Value};
/// use transloc_fallbacks::{FallbackReader, FallbackSpec, Locale, ReadOptions};
///
/// let mut values = BTreeMap::new();
/// values.insert(Locale::new("de-DE").unwrap(), json!("de val"));
///
/// let spec = FallbackSpec::custom([("en-US", "de-DE")]).unwrap();
/// let reader = FallbackReader::new(values, spec);
///
/// let en_us = Locale::new("en-US").unwrap();
/// assert_eq!(reader.read(&en_us, &ReadOptions::new()).unwrap(), json!("de val"));
/// assert_eq!(reader.read(&en_us, &ReadOptions::new().fallback(false)).unwrap(), Value::Null);
/// ```
#[derive(Debug)]
pub struct FallbackReader<S> {
    source: S,
    spec: FallbackSpec,
    max_depth: usize,
}

impl<S: ValueSource> FallbackReader<S> {
    /// Create a reader over `source` using `spec`.
    pub fn new(source: S, spec: FallbackSpec) -> Self {
        Self {
            source,
            spec,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit the number of lookups made while expanding a chain.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The configured spec.
    pub fn spec(&self) -> &FallbackSpec {
        &self.spec
    }

    /// The wrapped source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The wrapped source, mutably.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Unwrap the source.
    pub fn into_inner(self) -> S {
        self.source
    }

    /// The chain a read of `locale` with `options` would walk right now.
    pub fn chain_for(&self, locale: &Locale, options: &ReadOptions) -> LocaleChain {
        let active = current_override();
        LocaleChain::build_with_limit(
            locale,
            &self.spec,
            &options.fallback_option(),
            active.as_ref(),
            self.max_depth,
        )
    }

    /// Read `locale`, falling back along the chain.
    ///
    /// Returns the first usable value. When none is usable, returns the
    /// last value read, which may be nil or blank. A failing source read
    /// aborts the walk.
    pub fn read(&self, locale: &Locale, options: &ReadOptions) -> Result<Value, FallbackError> {
        let chain = self.chain_for(locale, options);

        let mut last = Value::Null;
        for (attempt, candidate) in chain.iter().enumerate() {
            let value = self.source.read(candidate, &options.passthrough)?;
            trace!(%candidate, attempt, ?value, "fallback read");

            if is_usable(&value) {
                if attempt > 0 {
                    debug!(requested = %locale, resolved = %candidate, "fell back");
                }
                return Ok(value);
            }
            last = value;
        }

        Ok(last)
    }

    /// Read with a raw option map, as produced by an accessor call.
    pub fn read_map(&self, locale: &Locale, options: &Options) -> Result<Value, FallbackError> {
        self.read(locale, &ReadOptions::from_map(options)?)
    }

    /// Write `value` for `locale`. Writes never fall back.
    pub fn write(
        &mut self,
        locale: &Locale,
        value: Value,
        options: &ReadOptions,
    ) -> Result<(), FallbackError> {
        self.source.write(locale, value, &options.passthrough)?;
        Ok(())
    }
}
