//! Amount conversion against the exchange-rate provider.
//!
//! One conversion is exactly one `GET <base>/<key>/latest/<SOURCE>`. There is
//! no caching and no retry: every failure is final for that call.

use std::collections::HashMap;
use std::fmt;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Amount, CurrencyCode};

/// Why a conversion failed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConversionError {
    /// Connection failure (`status` is `None`) or a non-2xx HTTP status.
    #[error("Exchange Rate API request failed: {message}")]
    Transport { status: Option<u16>, message: String },

    /// The provider answered but reported a logical failure.
    #[error("API request failed. Reason: {error_type}")]
    Api { error_type: String },

    /// The provider's rate table has no entry for the target.
    #[error("Could not find exchange rate for {code}")]
    RateNotFound { code: CurrencyCode },

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl ConversionError {
    /// HTTP status of a transport failure, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ConversionError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

/// Body of `GET /latest/<SOURCE>`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RatesResponse {
    #[serde(default)]
    pub result: Option<String>,

    #[serde(rename = "error-type", default)]
    pub error_type: Option<String>,

    /// Rates relative to the requested source currency.
    #[serde(default)]
    pub conversion_rates: Option<HashMap<String, f64>>,
}

/// A single conversion to perform.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: Amount,
    pub source: CurrencyCode,
    pub target: CurrencyCode,
}

impl ConversionRequest {
    pub fn new(amount: impl Into<Amount>, source: &str, target: &str) -> Self {
        Self {
            amount: amount.into(),
            source: CurrencyCode::new(source),
            target: CurrencyCode::new(target),
        }
    }
}

/// A successful conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub amount: Amount,
    pub source: CurrencyCode,
    pub target: CurrencyCode,
    pub rate: f64,
    pub converted: f64,
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} is equal to {:.2} {}",
            self.amount, self.source, self.converted, self.target
        )
    }
}

/// Client for the exchange-rate provider.
#[derive(Debug, Clone)]
pub struct ExchangeRateClient {
    http: Client,
    /// `<base>/<key>/latest/`, the source code is appended per request.
    endpoint: String,
}

impl ExchangeRateClient {
    /// Create a client for `base_url` using `api_key`.
    ///
    /// The key is not validated; an empty key simply yields a request the
    /// provider will reject.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(concat!("currency-agent/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}/{}/latest/", base_url.trim_end_matches('/'), api_key),
        })
    }

    /// URL used to fetch the rates for `source`.
    pub fn request_url(&self, source: &CurrencyCode) -> String {
        format!("{}{}", self.endpoint, source)
    }

    /// Fetch the latest rate table for `source`.
    pub async fn fetch_rates(&self, source: &CurrencyCode) -> Result<RatesResponse, ConversionError> {
        tracing::debug!("Fetching latest rates for {}", source);

        let response = self.http.get(self.request_url(source)).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!("Rate provider returned HTTP {} for {}", status, source);
            return Err(ConversionError::Transport {
                status: Some(status.as_u16()),
                message: format!("HTTP {}", status),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body)
            .map_err(|e| ConversionError::Unexpected(format!("invalid response body: {}", e)))
    }

    /// Convert `request.amount` from source to target currency.
    pub async fn convert(&self, request: &ConversionRequest) -> Result<Conversion, ConversionError> {
        let rates = self.fetch_rates(&request.source).await?;
        let rate = lookup_rate(&rates, &request.target)?;

        Ok(Conversion {
            amount: request.amount.clone(),
            source: request.source.clone(),
            target: request.target.clone(),
            rate,
            converted: request.amount.value() * rate,
        })
    }
}

/// Pick the target rate out of a provider response.
fn lookup_rate(rates: &RatesResponse, target: &CurrencyCode) -> Result<f64, ConversionError> {
    if rates.result.as_deref() != Some("success") {
        return Err(ConversionError::Api {
            error_type: rates
                .error_type
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
        });
    }

    let table = rates
        .conversion_rates
        .as_ref()
        .ok_or_else(|| ConversionError::Unexpected("response has no conversion_rates".to_string()))?;

    table
        .get(target.as_str())
        .copied()
        .ok_or_else(|| ConversionError::RateNotFound {
            code: target.clone(),
        })
}
