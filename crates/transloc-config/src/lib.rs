//! Configuration for transloc.
//!
//! Reads `transloc.yaml`, which selects the fallback mode, the default
//! registry, the chain depth limit and the storage backend.

pub mod types;
pub mod loader;
pub mod env;

pub use types::*;
pub use loader::*;
pub use env::*;

#[cfg(test)]
mod tests {
    use super::*;
    use transloc_backends::BackendKind;
    use transloc_fallbacks::{FallbackSpec, Locale, ReadOptions, Value, ValueSource};

    fn l(s: &str) -> Locale {
        Locale::new(s).unwrap()
    }

    #[test]
    fn test_default_config_has_sensible_values() {
        let config = TranslocConfig::default();

        assert_eq!(config.fallbacks, FallbacksConfig::Off);
        assert!(config.registry.defaults.is_empty());
        assert!(config.registry.map.is_empty());
        assert_eq!(config.max_depth, transloc_fallbacks::DEFAULT_MAX_DEPTH);
        assert_eq!(config.backend, BackendKind::KeyValue);
        assert_eq!(config.attribute, "title");
        assert!(matches!(config.fallback_spec().unwrap(), FallbackSpec::None));
    }

    #[test]
    fn test_config_serializes_to_yaml() {
        let yaml = serde_yaml::to_string(&TranslocConfig::default()).unwrap();

        assert!(yaml.contains("fallbacks: null"));
        assert!(yaml.contains("registry:"));
        assert!(yaml.contains("backend: key_value"));
        assert!(yaml.contains("attribute: title"));
    }

    #[test]
    fn test_registry_config_drives_reads() {
        let config = ConfigLoader::parse(
            r#"
fallbacks: true
registry:
  map:
    en-US: [de-DE]
backend: json
"#,
        )
        .unwrap();

        let mut backend = config.backend.build(&config.attribute, &[]);
        backend
            .write(&l("de-DE"), Value::from("de val"), &Default::default())
            .unwrap();

        let reader = config.reader(backend).unwrap();
        let chain: Vec<String> = reader
            .chain_for(&l("en-US"), &ReadOptions::new())
            .iter()
            .map(Locale::to_string)
            .collect();

        assert_eq!(chain, ["en-US", "en", "de-DE", "de"]);
        assert_eq!(
            reader.read(&l("en-US"), &ReadOptions::new()).unwrap(),
            Value::from("de val")
        );
    }

    #[test]
    fn test_custom_config_is_one_hop_per_entry() {
        let config = ConfigLoader::parse("fallbacks:\n  en-US: de-DE\n  de-DE: ja\n").unwrap();
        let reader = config.reader(std::collections::BTreeMap::new()).unwrap();

        let chain: Vec<String> = reader
            .chain_for(&l("en-US"), &ReadOptions::new())
            .iter()
            .map(Locale::to_string)
            .collect();
        assert_eq!(chain, ["en-US", "de-DE", "ja"]);
    }
}
