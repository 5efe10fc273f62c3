//! Tools the agent can call.
//!
//! Each tool advertises a name, a natural-language description and a JSON
//! schema for its arguments. `execute` returns the success payload rendered as
//! text, or a typed error the agent loop renders for the model.

mod currency;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::currency::{ConversionError, ExchangeRateClient, LookupError};
use crate::llm::{FunctionDefinition, ToolSchema};

pub use currency::{ConvertCurrency, GetCurrencyCode};

/// Errors surfaced by tool execution.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// A callable tool.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the model uses to call the tool.
    fn name(&self) -> &str;

    /// What the tool does, for the model.
    fn description(&self) -> &str;

    /// JSON schema of the arguments object.
    fn parameters_schema(&self) -> Value;

    async fn execute(&self, args: Value) -> Result<String, ToolError>;
}

/// Name and description of a registered tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

/// Registered tools, in registration order.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    by_name: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Registry with the two currency tools.
    pub fn new(rates: ExchangeRateClient) -> Self {
        let mut registry = Self::default();
        registry.register(Arc::new(ConvertCurrency::new(rates)));
        registry.register(Arc::new(GetCurrencyCode));
        registry
    }

    /// Add a tool. A tool with the same name replaces the earlier one.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        match self.by_name.get(&name) {
            Some(&index) => self.tools[index] = tool,
            None => {
                self.by_name.insert(name, self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|t| ToolInfo {
                name: t.name().to_string(),
                description: t.description().to_string(),
            })
            .collect()
    }

    /// Schemas in the chat-completions `tools` format.
    pub fn get_tool_schemas(&self) -> Vec<ToolSchema> {
        self.tools
            .iter()
            .map(|t| ToolSchema {
                schema_type: "function".to_string(),
                function: FunctionDefinition {
                    name: t.name().to_string(),
                    description: t.description().to_string(),
                    parameters: t.parameters_schema(),
                },
            })
            .collect()
    }

    /// Run the named tool with `args`.
    pub async fn execute(&self, name: &str, args: Value) -> Result<String, ToolError> {
        let tool = self
            .by_name
            .get(name)
            .map(|&index| &self.tools[index])
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        tool.execute(args).await
    }
}
