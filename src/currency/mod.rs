//! Currency domain: alias resolution and rate-based conversion.
//!
//! Both units are stateless. `codes` is a pure lookup over a static table,
//! `rates` performs exactly one outbound request per conversion.

mod codes;
mod rates;
#[cfg(test)]
pub(crate) mod test_support;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use codes::{aliases, resolve, LookupError};
pub use rates::{Conversion, ConversionError, ConversionRequest, ExchangeRateClient, RatesResponse};

/// A currency code such as `USD`.
///
/// Always upper-cased on construction. No ISO validation happens here; the
/// remote rate provider is the one that rejects unknown codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: &str) -> Self {
        Self(code.to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// An amount of money as the caller supplied it.
///
/// Keeps the original JSON number so it renders in its default form:
/// `100` stays `100`, `10.5` stays `10.5`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(serde_json::Number);

impl Amount {
    /// Build an amount from a float. Returns `None` for NaN or infinity.
    pub fn from_f64(value: f64) -> Option<Self> {
        serde_json::Number::from_f64(value).map(Self)
    }

    pub fn value(&self) -> f64 {
        // Every serde_json::Number has an f64 view without arbitrary_precision.
        self.0.as_f64().unwrap_or_default()
    }
}

impl From<i32> for Amount {
    fn from(value: i32) -> Self {
        Self(value.into())
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self(value.into())
    }
}

impl From<serde_json::Number> for Amount {
    fn from(value: serde_json::Number) -> Self {
        Self(value)
    }
}

impl std::str::FromStr for Amount {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str::<serde_json::Number>(s.trim()).map(Self)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
