//! Groq chat completions client (OpenAI-compatible wire format).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{ChatMessage, ChatResponse, LlmClient, ToolCall, ToolSchema};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Client for any OpenAI-compatible `/chat/completions` endpoint; Groq by default.
pub struct GroqClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl GroqClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

#[async_trait]
impl LlmClient for GroqClient {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[ToolSchema]>,
    ) -> anyhow::Result<ChatResponse> {
        let mut body = json!({
            "model": model,
            "messages": messages,
        });

        if let Some(tools) = tools.filter(|t| !t.is_empty()) {
            body["tools"] = serde_json::to_value(tools)?;
            body["tool_choice"] = json!("auto");
        }

        tracing::debug!("Sending {} messages to {}", messages.len(), model);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("LLM API error {}: {}", status, error_text));
        }

        let completion: CompletionResponse = response.json().await?;
        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("LLM returned no choices"))?;

        Ok(ChatResponse {
            content: choice.message.content.filter(|c| !c.is_empty()),
            tool_calls: choice.message.tool_calls,
            finish_reason: choice.finish_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::Value;

    use crate::llm::FunctionDefinition;

    /// Answer every completion with `reply`; records request headers and bodies.
    async fn spawn_llm(status: StatusCode, reply: Value) -> (String, Arc<Mutex<Vec<(HeaderMap, Value)>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorded = seen.clone();

        let app = Router::new().route(
            "/v1/chat/completions",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let reply = reply.clone();
                let recorded = recorded.clone();
                async move {
                    recorded.lock().unwrap().push((headers, body));
                    (status, Json(reply))
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/v1", addr), seen)
    }

    fn lookup_schema() -> ToolSchema {
        ToolSchema {
            schema_type: "function".to_string(),
            function: FunctionDefinition {
                name: "get_currency_code".to_string(),
                description: "Find a code".to_string(),
                parameters: json!({"type": "object", "properties": {}}),
            },
        }
    }

    #[tokio::test]
    async fn parses_tool_calls_and_sends_tools() {
        let reply = json!({
            "choices": [{
                "finish_reason": "tool_calls",
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "get_currency_code", "arguments": "{\"currency\":\"yen\"}"}
                    }]
                }
            }]
        });
        let (base, seen) = spawn_llm(StatusCode::OK, reply).await;
        let client = GroqClient::with_base_url("gsk-test".to_string(), &base);
        let tools = vec![lookup_schema()];

        let response = client
            .chat_completion("llama3-8b-8192", &[ChatMessage::user("yen?")], Some(tools.as_slice()))
            .await
            .expect("completion");

        let calls = response.tool_calls.expect("tool calls");
        assert_eq!(calls[0].function.name, "get_currency_code");
        assert_eq!(response.content, None);
        assert_eq!(response.finish_reason.as_deref(), Some("tool_calls"));

        let seen = seen.lock().unwrap();
        let (headers, body) = &seen[0];
        assert_eq!(headers["authorization"], "Bearer gsk-test");
        assert_eq!(body["model"], "llama3-8b-8192");
        assert_eq!(body["tool_choice"], "auto");
        assert_eq!(body["tools"][0]["function"]["name"], "get_currency_code");
    }

    #[tokio::test]
    async fn omits_tools_when_none_given() {
        let reply = json!({"choices": [{"message": {"content": "Hello"}}]});
        let (base, seen) = spawn_llm(StatusCode::OK, reply).await;
        let client = GroqClient::with_base_url("k".to_string(), &base);

        let response = client
            .chat_completion("m", &[ChatMessage::user("hi")], None)
            .await
            .unwrap();

        assert_eq!(response.content.as_deref(), Some("Hello"));
        assert!(seen.lock().unwrap()[0].1.get("tools").is_none());
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let reply = json!({"error": {"message": "invalid api key"}});
        let (base, _) = spawn_llm(StatusCode::UNAUTHORIZED, reply).await;
        let client = GroqClient::with_base_url("bad".to_string(), &base);

        let err = client
            .chat_completion("m", &[ChatMessage::user("hi")], None)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("invalid api key"));
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let (base, _) = spawn_llm(StatusCode::OK, json!({"choices": []})).await;
        let client = GroqClient::with_base_url("k".to_string(), &base);

        assert!(client
            .chat_completion("m", &[ChatMessage::user("hi")], None)
            .await
            .is_err());
    }
}
