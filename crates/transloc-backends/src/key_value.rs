//! Key-value strategy: a translation table shared by many attributes.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::trace;
use transloc_fallbacks::{Locale, Options, SourceError, Value, ValueSource};

/// Translation rows keyed by attribute name and locale.
///
/// Clones share the same rows.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    rows: Arc<RwLock<HashMap<(String, Locale), Value>>>,
}

impl TranslationTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.read().map(|rows| rows.len()).unwrap_or(0)
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, attribute: &str, locale: &Locale) -> Result<Value, SourceError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| SourceError::read(locale, "translation table lock poisoned"))?;
        Ok(rows
            .get(&(attribute.to_string(), locale.clone()))
            .cloned()
            .unwrap_or(Value::Null))
    }

    fn set(&self, attribute: &str, locale: &Locale, value: Value) -> Result<(), SourceError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| SourceError::write(locale, "translation table lock poisoned"))?;
        let key = (attribute.to_string(), locale.clone());
        if value.is_null() {
            rows.remove(&key);
        } else {
            rows.insert(key, value);
        }
        Ok(())
    }
}

/// One attribute's view of a [`TranslationTable`].
#[derive(Debug, Clone)]
pub struct KeyValueBackend {
    attribute: String,
    table: TranslationTable,
}

impl KeyValueBackend {
    /// Create a backend for `attribute` backed by `table`.
    pub fn new(attribute: impl Into<String>, table: TranslationTable) -> Self {
        Self {
            attribute: attribute.into(),
            table,
        }
    }

    /// The attribute name.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }
}

impl ValueSource for KeyValueBackend {
    fn read(&self, locale: &Locale, _options: &Options) -> Result<Value, SourceError> {
        let value = self.table.get(&self.attribute, locale)?;
        trace!(attribute = %self.attribute, %locale, ?value, "key_value read");
        Ok(value)
    }

    fn write(&mut self, locale: &Locale, value: Value, _options: &Options) -> Result<(), SourceError> {
        self.table.set(&self.attribute, locale, value)
    }
}
