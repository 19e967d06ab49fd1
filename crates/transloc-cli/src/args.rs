//! Value parsers for CLI arguments.

use transloc_fallbacks::{FallbackOption, Locale};

/// Parse a locale tag.
pub fn parse_locale(s: &str) -> Result<Locale, String> {
    Locale::new(s).map_err(|e| e.to_string())
}

/// Parse a fallback option: `false`, `true`, a locale, or a comma-separated
/// locale list. Empty list entries are skipped.
pub fn parse_fallback(s: &str) -> Result<FallbackOption, String> {
    let s = s.trim();
    match s.to_lowercase().as_str() {
        "false" => return Ok(FallbackOption::Disabled),
        "true" => return Ok(FallbackOption::Enabled),
        "default" => return Ok(FallbackOption::Default),
        _ => {}
    }

    if !s.contains(',') {
        return parse_locale(s).map(FallbackOption::SingleLocale);
    }

    parse_comma_list(s)
        .iter()
        .map(|tag| parse_locale(tag))
        .collect::<Result<Vec<_>, _>>()
        .map(FallbackOption::LocaleList)
}

/// Parse a list of items separated by comma
pub fn parse_comma_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn l(s: &str) -> Locale {
        Locale::new(s).unwrap()
    }

    #[test_case("false", FallbackOption::Disabled ; "false disables")]
    #[test_case("TRUE", FallbackOption::Enabled ; "true enables")]
    #[test_case("default", FallbackOption::Default ; "explicit default")]
    #[test_case("ja", FallbackOption::SingleLocale(l("ja")) ; "single locale")]
    #[test_case("pl, de-DE", FallbackOption::LocaleList(vec![l("pl"), l("de-DE")]) ; "list")]
    #[test_case("pl,,", FallbackOption::LocaleList(vec![l("pl")]) ; "list skips empty entries")]
    fn test_parse_fallback(input: &str, expected: FallbackOption) {
        assert_eq!(parse_fallback(input).unwrap(), expected);
    }

    #[test]
    fn test_parse_fallback_rejects_bad_locales() {
        assert!(parse_fallback("de--DE").is_err());
        assert!(parse_fallback("pl,en US").is_err());
        assert!(parse_fallback("").is_err());
    }

    #[test]
    fn test_parse_comma_list() {
        assert_eq!(parse_comma_list(" a, b ,,c"), vec!["a", "b", "c"]);
        assert!(parse_comma_list("").is_empty());
    }
}
