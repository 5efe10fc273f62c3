//! Core agent loop implementation.

use std::sync::Arc;

use crate::config::Config;
use crate::currency::ExchangeRateClient;
use crate::llm::{ChatMessage, GroqClient, LlmClient, Role, ToolCall};
use crate::tools::ToolRegistry;

use super::prompt::build_system_prompt;

/// Final output when the loop runs out of iterations.
pub const ITERATION_LIMIT_OUTPUT: &str = "Agent stopped due to iteration limit or time limit.";

/// One tool invocation made while answering a query.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentStep {
    pub tool: String,
    pub arguments: String,
    /// Text handed back to the model.
    pub observation: String,
}

/// Final answer plus the tool calls that led to it.
#[derive(Debug, Clone)]
pub struct AgentReply {
    pub output: String,
    pub steps: Vec<AgentStep>,
}

/// The currency agent.
pub struct Agent {
    config: Config,
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
}

impl Agent {
    /// Create an agent talking to the configured LLM and rate providers.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let llm = Arc::new(GroqClient::with_base_url(
            config.llm_api_key.clone(),
            &config.llm_base_url,
        ));
        let rates =
            ExchangeRateClient::new(&config.exchange_rate_base_url, &config.exchange_rate_api_key)?;

        Ok(Self::with_parts(config, llm, ToolRegistry::new(rates)))
    }

    pub fn with_parts(config: Config, llm: Arc<dyn LlmClient>, tools: ToolRegistry) -> Self {
        Self { config, llm, tools }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Answer a single user query.
    pub async fn run(&self, query: &str) -> anyhow::Result<AgentReply> {
        let mut steps = Vec::new();

        let mut messages = vec![
            ChatMessage::system(build_system_prompt(&self.tools)),
            ChatMessage::user(query),
        ];

        let tool_schemas = self.tools.get_tool_schemas();
        let model = self.config.default_model.as_str();

        for iteration in 0..self.config.max_iterations {
            tracing::debug!("Agent iteration {}", iteration + 1);

            let response = self
                .llm
                .chat_completion(model, &messages, Some(tool_schemas.as_slice()))
                .await?;

            if let Some(tool_calls) = response.tool_calls.filter(|calls| !calls.is_empty()) {
                messages.push(ChatMessage {
                    role: Role::Assistant,
                    content: response.content.clone(),
                    tool_calls: Some(tool_calls.clone()),
                    tool_call_id: None,
                });

                // One at a time, in the order the model asked for them.
                for tool_call in &tool_calls {
                    let observation = self.execute_tool_call(tool_call).await;

                    steps.push(AgentStep {
                        tool: tool_call.function.name.clone(),
                        arguments: tool_call.function.arguments.clone(),
                        observation: observation.clone(),
                    });
                    messages.push(ChatMessage::tool_result(tool_call.id.clone(), observation));
                }

                continue;
            }

            // No tool calls - this is the final response
            return match response.content {
                Some(output) => Ok(AgentReply { output, steps }),
                None => Err(anyhow::anyhow!("LLM returned empty response")),
            };
        }

        tracing::warn!(
            "Max iterations ({}) reached without a final answer",
            self.config.max_iterations
        );
        Ok(AgentReply {
            output: ITERATION_LIMIT_OUTPUT.to_string(),
            steps,
        })
    }

    /// Execute one tool call and render its outcome for the model.
    async fn execute_tool_call(&self, tool_call: &ToolCall) -> String {
        let name = tool_call.function.name.as_str();
        tracing::info!("Calling tool: {} with args: {}", name, tool_call.function.arguments);

        let args: serde_json::Value = serde_json::from_str(&tool_call.function.arguments)
            .unwrap_or(serde_json::Value::Null);

        match self.tools.execute(name, args).await {
            Ok(output) => {
                tracing::info!("Tool {} returned: {}", name, output);
                output
            }
            Err(e) => {
                tracing::info!("Tool {} failed: {}", name, e);
                format!("Error: {}", e)
            }
        }
    }
}
