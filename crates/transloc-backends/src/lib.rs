//! Storage strategies for translated attributes.
//!
//! Each backend stores one attribute's per-locale values and implements
//! [`ValueSource`], so it can sit behind a
//! [`FallbackReader`](transloc_fallbacks::FallbackReader):
//!
//! - [`KeyValueBackend`]: rows in a shared translation table keyed by
//!   attribute and locale
//! - [`ColumnBackend`]: one column per locale (`title_en`, `title_pt_br`)
//! - [`JsonBackend`]: a JSON object column keyed by locale
//! - [`HstoreBackend`]: a string-to-string map column keyed by locale

#![warn(missing_docs)]

mod column;
mod hstore;
mod json;
mod key_value;

pub use column::{column_name, ColumnBackend};
pub use hstore::HstoreBackend;
pub use json::JsonBackend;
pub use key_value::{KeyValueBackend, TranslationTable};

use serde::{Deserialize, Serialize};
use tracing::debug;
use transloc_fallbacks::{FallbackError, FallbackReader, Locale, ReadOptions, Value, ValueSource};

/// Read option naming a value to return when the fallback read finds nothing.
pub const DEFAULT_KEY: &str = "default";

/// Backend selector used by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// [`KeyValueBackend`].
    #[default]
    KeyValue,
    /// [`ColumnBackend`].
    Column,
    /// [`JsonBackend`].
    Json,
    /// [`HstoreBackend`].
    Hstore,
}

impl BackendKind {
    /// Build an empty backend of this kind for `attribute`.
    ///
    /// Column backends get a column for each of `locales`.
    pub fn build(self, attribute: &str, locales: &[Locale]) -> Box<dyn ValueSource + Send + Sync> {
        match self {
            Self::KeyValue => Box::new(KeyValueBackend::new(attribute, TranslationTable::new())),
            Self::Column => Box::new(ColumnBackend::new(attribute, locales.iter().cloned())),
            Self::Json => Box::new(JsonBackend::new()),
            Self::Hstore => Box::new(HstoreBackend::new()),
        }
    }

    /// Name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Self::KeyValue => "key_value",
            Self::Column => "column",
            Self::Json => "json",
            Self::Hstore => "hstore",
        }
    }
}

/// Read `locale` through `reader`, substituting the `default` option when
/// the whole fallback read returns nil.
///
/// The `default` key is taken out of a copy of `options`, so backends never
/// see it and every locale in the chain is tried before it applies.
pub fn read_or_default<S: ValueSource>(
    reader: &FallbackReader<S>,
    locale: &Locale,
    options: &ReadOptions,
) -> Result<Value, FallbackError> {
    let mut options = options.clone();
    let default = options.passthrough.remove(DEFAULT_KEY);

    match (reader.read(locale, &options)?, default) {
        (Value::Null, Some(default)) => {
            debug!(%locale, "no stored value, using default");
            Ok(default)
        }
        (value, _) => Ok(value),
    }
}
