//! Currency tools: code lookup and amount conversion.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{Tool, ToolError};
use crate::currency::{self, Amount, ConversionRequest, ExchangeRateClient};

/// Find the 3-letter code for a currency name or symbol.
pub struct GetCurrencyCode;

#[async_trait]
impl Tool for GetCurrencyCode {
    fn name(&self) -> &str {
        "get_currency_code"
    }

    fn description(&self) -> &str {
        "Finds the 3-letter currency code for a given currency name or symbol (e.g. \"dollar\", \"€\", \"INR\"). Returns the code if found, otherwise an error message."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "currency": {
                    "type": "string",
                    "description": "The currency name or symbol (e.g., \"dollar\", \"€\", \"INR\")"
                }
            },
            "required": ["currency"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String, ToolError> {
        let input = string_arg(&args, "currency")?;
        let code = currency::resolve(input)?;
        Ok(code.to_string())
    }
}

/// Convert an amount between two currency codes using live rates.
pub struct ConvertCurrency {
    rates: ExchangeRateClient,
}

impl ConvertCurrency {
    pub fn new(rates: ExchangeRateClient) -> Self {
        Self { rates }
    }
}

#[async_trait]
impl Tool for ConvertCurrency {
    fn name(&self) -> &str {
        "convert_currency"
    }

    fn description(&self) -> &str {
        "Converts an amount from a source currency to a target currency. Both currencies must be 3-letter codes (e.g. \"USD\", \"EUR\"). Returns the converted amount and the target currency, or an error message if the conversion fails."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "amount": {
                    "type": "number",
                    "description": "The amount of money to convert"
                },
                "source_currency": {
                    "type": "string",
                    "description": "The currency code of the source currency (e.g., \"USD\")"
                },
                "target_currency": {
                    "type": "string",
                    "description": "The currency code of the target currency (e.g., \"EUR\")"
                }
            },
            "required": ["amount", "source_currency", "target_currency"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String, ToolError> {
        let amount = amount_arg(&args)?;
        let source = string_arg(&args, "source_currency")?;
        let target = string_arg(&args, "target_currency")?;

        let request = ConversionRequest::new(amount, source, target);
        tracing::info!(
            "Converting {} {} to {}",
            request.amount,
            request.source,
            request.target
        );

        let conversion = self.rates.convert(&request).await?;
        Ok(conversion.to_string())
    }
}

fn string_arg<'a>(args: &'a Value, key: &str) -> Result<&'a str, ToolError> {
    args[key]
        .as_str()
        .ok_or_else(|| ToolError::InvalidArguments(format!("Missing '{}' argument", key)))
}

/// The `amount` argument; models sometimes send numbers as strings.
fn amount_arg(args: &Value) -> Result<Amount, ToolError> {
    match &args["amount"] {
        Value::Number(n) => Ok(Amount::from(n.clone())),
        Value::String(s) => s
            .parse()
            .map_err(|_| ToolError::InvalidArguments(format!("'amount' is not a number: {}", s))),
        Value::Null => Err(ToolError::InvalidArguments("Missing 'amount' argument".to_string())),
        other => Err(ToolError::InvalidArguments(format!(
            "'amount' is not a number: {}",
            other
        ))),
    }
}
