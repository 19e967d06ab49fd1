//! Default fallback registry and the generator strategy behind it.

use std::collections::{HashMap, HashSet};

use crate::{FallbackError, Locale};

/// Produces the fallback locales for a locale.
///
/// Supplied when a backend is built; see [`FallbackSpec::Default`](crate::FallbackSpec::Default).
pub trait FallbackGenerator: Send + Sync {
    /// Fallback locales for `locale`, most preferred first.
    fn fallbacks(&self, locale: &Locale) -> Vec<Locale>;
}

impl<F> FallbackGenerator for F
where
    F: Fn(&Locale) -> Vec<Locale> + Send + Sync,
{
    fn fallbacks(&self, locale: &Locale) -> Vec<Locale> {
        self(locale)
    }
}

/// A generator that never falls back.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFallbacks;

impl FallbackGenerator for NoFallbacks {
    fn fallbacks(&self, _locale: &Locale) -> Vec<Locale> {
        Vec::new()
    }
}

/// Application-wide fallback registry.
///
/// For a locale, yields its tag parents, then each mapped locale with its
/// parents, then each default locale with its parents.
///
/// ```
/// use transloc_fallbacks::{FallbackGenerator, Locale, LocaleFallbacks};
///
/// let mut registry = LocaleFallbacks::new();
/// registry.map("en-US", ["ja"]).unwrap();
///
/// let en_us = Locale::new("en-US").unwrap();
/// let tags: Vec<String> = registry.fallbacks(&en_us).iter().map(|l| l.to_string()).collect();
/// assert_eq!(tags, ["en", "ja"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocaleFallbacks {
    defaults: Vec<Locale>,
    map: HashMap<Locale, Vec<Locale>>,
}

impl LocaleFallbacks {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with default locales appended to every chain.
    pub fn with_defaults<I, S>(defaults: I) -> Result<Self, FallbackError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            defaults: parse_all(defaults)?,
            map: HashMap::new(),
        })
    }

    /// Add mapped fallbacks for a locale, after any already mapped.
    pub fn map<I, S>(&mut self, locale: &str, fallbacks: I) -> Result<&mut Self, FallbackError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let locale = Locale::new(locale)?;
        let fallbacks = parse_all(fallbacks)?;
        self.map.entry(locale).or_default().extend(fallbacks);
        Ok(self)
    }

    /// Default locales.
    pub fn defaults(&self) -> &[Locale] {
        &self.defaults
    }
}

impl FallbackGenerator for LocaleFallbacks {
    fn fallbacks(&self, locale: &Locale) -> Vec<Locale> {
        let mut seen = HashSet::new();
        seen.insert(locale.clone());
        let mut out = Vec::new();

        let mut add = |candidate: Locale| {
            for ancestor in candidate.ancestors() {
                if seen.insert(ancestor.clone()) {
                    out.push(ancestor);
                }
            }
        };

        if let Some(parent) = locale.parent() {
            add(parent);
        }
        for mapped in self.map.get(locale).into_iter().flatten() {
            add(mapped.clone());
        }
        for default in &self.defaults {
            add(default.clone());
        }

        out
    }
}

fn parse_all<I, S>(tags: I) -> Result<Vec<Locale>, FallbackError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter().map(|tag| Locale::new(tag.as_ref())).collect()
}
