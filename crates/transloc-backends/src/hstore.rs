//! Hstore strategy: a flat string-to-string map keyed by locale.

use std::collections::BTreeMap;

use tracing::trace;
use transloc_fallbacks::{Locale, Options, SourceError, Value, ValueSource};

use crate::json::json_type;

/// An attribute stored as a string map. Only strings can be stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HstoreBackend {
    column: BTreeMap<String, String>,
}

impl HstoreBackend {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a stored map.
    pub fn from_map(column: BTreeMap<String, String>) -> Self {
        Self { column }
    }

    /// The map as stored.
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.column
    }
}

impl ValueSource for HstoreBackend {
    fn read(&self, locale: &Locale, _options: &Options) -> Result<Value, SourceError> {
        let value = self
            .column
            .get(locale.as_str())
            .map(|s| Value::String(s.clone()))
            .unwrap_or(Value::Null);
        trace!(%locale, ?value, "hstore read");
        Ok(value)
    }

    fn write(&mut self, locale: &Locale, value: Value, _options: &Options) -> Result<(), SourceError> {
        match value {
            Value::Null => {
                self.column.remove(locale.as_str());
                Ok(())
            }
            Value::String(s) => {
                self.column.insert(locale.to_string(), s);
                Ok(())
            }
            other => Err(SourceError::TypeMismatch {
                locale: locale.to_string(),
                expected: "string",
                actual: json_type(&other),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn l(s: &str) -> Locale {
        Locale::new(s).unwrap()
    }

    #[test]
    fn test_strings_only() {
        let mut backend = HstoreBackend::new();
        let opts = Options::new();

        backend.write(&l("en"), json!("Hello"), &opts).unwrap();
        let err = backend.write(&l("en"), json!(42), &opts).unwrap_err();
        assert!(matches!(err, SourceError::TypeMismatch { expected: "string", actual: "number", .. }));

        assert_eq!(backend.read(&l("en"), &opts).unwrap(), json!("Hello"));
    }

    #[test]
    fn test_from_map_and_delete() {
        let mut backend = HstoreBackend::from_map(BTreeMap::from([("pt".to_string(), "Olá".to_string())]));
        let opts = Options::new();

        assert_eq!(backend.read(&l("pt"), &opts).unwrap(), json!("Olá"));
        backend.write(&l("pt"), Value::Null, &opts).unwrap();
        assert!(backend.as_map().is_empty());
    }
}
