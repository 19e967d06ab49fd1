//! Locale chain construction.
//!
//! # Invariants
//!
//! 1. **Requested locale first**: the requested locale is always at
//!    position 0 and appears exactly once.
//!
//! 2. **No duplicates**: a locale is appended only if it is not already
//!    in the chain; the first occurrence keeps its position.
//!
//! 3. **Bounded**: expansion performs at most `max_depth` lookups, so a
//!    chain is finite even for generators that keep producing new locales.

use std::collections::HashSet;

use tracing::debug;

use crate::{FallbackOption, FallbackSpec, Locale};

/// Lookup limit applied when expanding a chain through a spec.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Ordered, de-duplicated sequence of locales to read.
#[derive(Debug, Clone, Default)]
pub struct LocaleChain {
    locales: Vec<Locale>,
    seen: HashSet<Locale>,
}

impl LocaleChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the chain for `requested`.
    ///
    /// An active `override_option` replaces `option` entirely.
    pub fn build(
        requested: &Locale,
        spec: &FallbackSpec,
        option: &FallbackOption,
        override_option: Option<&FallbackOption>,
    ) -> Self {
        Self::build_with_limit(requested, spec, option, override_option, DEFAULT_MAX_DEPTH)
    }

    /// Like [`build`](Self::build) with an explicit expansion limit.
    pub fn build_with_limit(
        requested: &Locale,
        spec: &FallbackSpec,
        option: &FallbackOption,
        override_option: Option<&FallbackOption>,
        max_depth: usize,
    ) -> Self {
        let effective = override_option.unwrap_or(option);

        let mut chain = Self::new();
        chain.push(requested.clone());

        match effective {
            FallbackOption::Disabled => {}
            FallbackOption::SingleLocale(locale) => {
                chain.push(locale.clone());
            }
            FallbackOption::LocaleList(locales) => {
                for locale in locales {
                    chain.push(locale.clone());
                }
            }
            FallbackOption::Enabled | FallbackOption::Default => {
                chain.expand(spec, max_depth);
            }
        }

        debug!(
            %requested,
            option = ?effective,
            overridden = override_option.is_some(),
            chain = ?chain.locales,
            "resolved locale chain"
        );
        chain
    }

    /// Append `locale` unless already present. Returns whether it was added.
    pub fn push(&mut self, locale: Locale) -> bool {
        if self.seen.insert(locale.clone()) {
            self.locales.push(locale);
            true
        } else {
            false
        }
    }

    /// Whether `locale` is in the chain.
    pub fn contains(&self, locale: &Locale) -> bool {
        self.seen.contains(locale)
    }

    /// Number of locales.
    pub fn len(&self) -> usize {
        self.locales.len()
    }

    /// Whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// Iterate in read order.
    pub fn iter(&self) -> std::slice::Iter<'_, Locale> {
        self.locales.iter()
    }

    /// Locales in read order.
    pub fn as_slice(&self) -> &[Locale] {
        &self.locales
    }

    /// Consume into a vector.
    pub fn into_vec(self) -> Vec<Locale> {
        self.locales
    }

    fn expand(&mut self, spec: &FallbackSpec, max_depth: usize) {
        if !spec.expands() {
            return;
        }

        let mut cursor = 0;
        let mut lookups = 0;
        while cursor < self.locales.len() {
            if lookups == max_depth {
                debug!(max_depth, chain = ?self.locales, "fallback expansion hit depth limit");
                break;
            }
            let current = self.locales[cursor].clone();
            cursor += 1;
            lookups += 1;

            for next in spec.lookup(&current) {
                self.push(next);
            }
        }
    }
}

impl PartialEq for LocaleChain {
    fn eq(&self, other: &Self) -> bool {
        self.locales == other.locales
    }
}

impl Eq for LocaleChain {}

impl<'a> IntoIterator for &'a LocaleChain {
    type Item = &'a Locale;
    type IntoIter = std::slice::Iter<'a, Locale>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for LocaleChain {
    type Item = Locale;
    type IntoIter = std::vec::IntoIter<Locale>;

    fn into_iter(self) -> Self::IntoIter {
        self.locales.into_iter()
    }
}

impl FromIterator<Locale> for LocaleChain {
    fn from_iter<I: IntoIterator<Item = Locale>>(iter: I) -> Self {
        let mut chain = Self::new();
        for locale in iter {
            chain.push(locale);
        }
        chain
    }
}
