//! Currency alias resolution.

use std::collections::HashMap;
use std::sync::OnceLock;

use thiserror::Error;

use super::CurrencyCode;

/// Common currency names and symbols, keyed by their lower-cased form.
const ALIASES: &[(&str, &str)] = &[
    ("usd", "USD"),
    ("dollar", "USD"),
    ("dollars", "USD"),
    ("$", "USD"),
    ("eur", "EUR"),
    ("euro", "EUR"),
    ("euros", "EUR"),
    ("€", "EUR"),
    ("jpy", "JPY"),
    ("yen", "JPY"),
    ("gbp", "GBP"),
    ("pound", "GBP"),
    ("pounds", "GBP"),
    ("£", "GBP"),
    ("cad", "CAD"),
    ("canadian dollar", "CAD"),
    ("php", "PHP"),
    ("philippine peso", "PHP"),
    ("inr", "INR"),
    ("indian rupee", "INR"),
    ("rupee", "INR"),
    ("₹", "INR"),
];

static ALIAS_TABLE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

fn table() -> &'static HashMap<&'static str, &'static str> {
    ALIAS_TABLE.get_or_init(|| ALIASES.iter().copied().collect())
}

/// The alias was not found in the table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Could not find currency code for '{input}'. Please provide a standard 3-letter code like 'USD'.")]
pub struct LookupError {
    /// The input exactly as given, before lower-casing.
    pub input: String,
}

/// Resolve a currency name, symbol or code to its 3-letter code.
///
/// Matching is exact after lower-casing; there is no fuzzy or partial match.
pub fn resolve(input: &str) -> Result<CurrencyCode, LookupError> {
    table()
        .get(input.to_lowercase().as_str())
        .map(|code| CurrencyCode::new(code))
        .ok_or_else(|| LookupError {
            input: input.to_string(),
        })
}

/// All known aliases with their codes.
pub fn aliases() -> impl Iterator<Item = (&'static str, &'static str)> {
    ALIASES.iter().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_alias_resolves_to_its_code() {
        for (alias, code) in aliases() {
            assert_eq!(resolve(alias).unwrap().as_str(), code, "alias {alias}");
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        for (alias, code) in aliases() {
            assert_eq!(resolve(&alias.to_uppercase()).unwrap().as_str(), code);
        }
        assert_eq!(resolve("Canadian Dollar").unwrap().as_str(), "CAD");
    }

    #[test]
    fn aliases_are_unique() {
        assert_eq!(table().len(), ALIASES.len());
    }

    #[test]
    fn unknown_input_keeps_original_text() {
        let err = resolve("Bitcoin").unwrap_err();
        assert_eq!(err.input, "Bitcoin");
        assert_eq!(
            err.to_string(),
            "Could not find currency code for 'Bitcoin'. Please provide a standard 3-letter code like 'USD'."
        );
    }

    #[test]
    fn no_partial_or_padded_matches() {
        assert!(resolve("dolla").is_err());
        assert!(resolve(" usd").is_err());
        assert!(resolve("").is_err());
    }

    #[test]
    fn symbols_resolve() {
        assert_eq!(resolve("€").unwrap().as_str(), "EUR");
        assert_eq!(resolve("£").unwrap().as_str(), "GBP");
        assert_eq!(resolve("₹").unwrap().as_str(), "INR");
        assert_eq!(resolve("$").unwrap().as_str(), "USD");
    }
}
