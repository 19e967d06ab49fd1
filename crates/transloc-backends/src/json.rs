//! JSON strategy: a single object column keyed by locale.

use serde_json::Map;
use tracing::trace;
use transloc_fallbacks::{Locale, Options, SourceError, Value, ValueSource};

/// An attribute stored as `{ "<locale>": value, ... }`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonBackend {
    column: Map<String, Value>,
}

impl JsonBackend {
    /// Create an empty column.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a stored column. `null` is an empty column; anything other than
    /// an object is rejected.
    pub fn from_value(value: Value) -> Result<Self, SourceError> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Object(column) => Ok(Self { column }),
            other => Err(SourceError::TypeMismatch {
                locale: "*".to_string(),
                expected: "object",
                actual: json_type(&other),
            }),
        }
    }

    /// The column as stored.
    pub fn to_value(&self) -> Value {
        Value::Object(self.column.clone())
    }
}

impl ValueSource for JsonBackend {
    fn read(&self, locale: &Locale, _options: &Options) -> Result<Value, SourceError> {
        let value = self.column.get(locale.as_str()).cloned().unwrap_or(Value::Null);
        trace!(%locale, ?value, "json read");
        Ok(value)
    }

    fn write(&mut self, locale: &Locale, value: Value, _options: &Options) -> Result<(), SourceError> {
        if value.is_null() {
            self.column.remove(locale.as_str());
        } else {
            self.column.insert(locale.to_string(), value);
        }
        Ok(())
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
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
    fn test_load_and_read() {
        let backend = JsonBackend::from_value(json!({"en": "Hello", "ja": {"nested": 1}})).unwrap();
        let opts = Options::new();

        assert_eq!(backend.read(&l("en"), &opts).unwrap(), json!("Hello"));
        assert_eq!(backend.read(&l("ja"), &opts).unwrap(), json!({"nested": 1}));
        assert_eq!(backend.read(&l("fr"), &opts).unwrap(), Value::Null);
    }

    #[test]
    fn test_rejects_non_object_columns() {
        let err = JsonBackend::from_value(json!(["en"])).unwrap_err();
        assert_eq!(err.to_string(), "type mismatch for *: expected object, got array");
        assert_eq!(JsonBackend::from_value(Value::Null).unwrap(), JsonBackend::new());
    }

    #[test]
    fn test_null_write_removes_key() {
        let mut backend = JsonBackend::new();
        let opts = Options::new();

        backend.write(&l("de"), json!("Hallo"), &opts).unwrap();
        assert_eq!(backend.to_value(), json!({"de": "Hallo"}));

        backend.write(&l("de"), Value::Null, &opts).unwrap();
        assert_eq!(backend.to_value(), json!({}));
    }
}
