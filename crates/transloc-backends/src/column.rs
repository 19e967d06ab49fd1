//! Column strategy: one column per locale on the model's own row.

use std::collections::BTreeMap;

use tracing::trace;
use transloc_fallbacks::{Locale, Options, SourceError, Value, ValueSource};

/// Column holding `attribute` in `locale`: `title` + `pt-BR` -> `title_pt_br`.
pub fn column_name(attribute: &str, locale: &Locale) -> String {
    format!("{}_{}", attribute, locale.as_str().replace('-', "_").to_lowercase())
}

/// A row with a column per configured locale.
#[derive(Debug, Clone, Default)]
pub struct ColumnBackend {
    attribute: String,
    columns: BTreeMap<String, Value>,
}

impl ColumnBackend {
    /// Create a row for `attribute` with a null column for each locale.
    pub fn new(attribute: impl Into<String>, locales: impl IntoIterator<Item = Locale>) -> Self {
        let attribute = attribute.into();
        let columns = locales
            .into_iter()
            .map(|locale| (column_name(&attribute, &locale), Value::Null))
            .collect();
        Self { attribute, columns }
    }

    /// Column names and their current values.
    pub fn columns(&self) -> &BTreeMap<String, Value> {
        &self.columns
    }

    /// Whether the row has a column for `locale`.
    pub fn has_column(&self, locale: &Locale) -> bool {
        self.columns.contains_key(&column_name(&self.attribute, locale))
    }
}

impl ValueSource for ColumnBackend {
    fn read(&self, locale: &Locale, _options: &Options) -> Result<Value, SourceError> {
        let column = column_name(&self.attribute, locale);
        let value = self.columns.get(&column).cloned().unwrap_or(Value::Null);
        trace!(%column, ?value, "column read");
        Ok(value)
    }

    fn write(&mut self, locale: &Locale, value: Value, _options: &Options) -> Result<(), SourceError> {
        let column = column_name(&self.attribute, locale);
        match self.columns.get_mut(&column) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(SourceError::write(locale, format!("no column {column}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn l(s: &str) -> Locale {
        Locale::new(s).unwrap()
    }

    #[test_case("en", "title_en")]
    #[test_case("pt-BR", "title_pt_br")]
    #[test_case("zh-Hant-TW", "title_zh_hant_tw")]
    fn test_column_name(tag: &str, expected: &str) {
        assert_eq!(column_name("title", &l(tag)), expected);
    }

    #[test]
    fn test_missing_column_reads_null_and_rejects_writes() {
        let mut row = ColumnBackend::new("title", [l("en"), l("de")]);
        let opts = Options::new();

        assert!(row.has_column(&l("de")));
        assert!(!row.has_column(&l("fr")));
        assert_eq!(row.read(&l("fr"), &opts).unwrap(), Value::Null);

        let err = row.write(&l("fr"), json!("Titre"), &opts).unwrap_err();
        assert_eq!(err.to_string(), "failed to write fr: no column title_fr");
    }

    #[test]
    fn test_write_then_read() {
        let mut row = ColumnBackend::new("title", [l("en")]);
        let opts = Options::new();

        row.write(&l("en"), json!("Title"), &opts).unwrap();
        assert_eq!(row.columns().get("title_en"), Some(&json!("Title")));
        assert_eq!(row.read(&l("en"), &opts).unwrap(), json!("Title"));
    }
}
