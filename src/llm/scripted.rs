//! Scripted `LlmClient` that replays canned replies.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ChatMessage, ChatResponse, FunctionCall, LlmClient, ToolCall, ToolSchema};

/// Replays `replies` in order and records every conversation it was sent.
#[derive(Default)]
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<anyhow::Result<ChatResponse>>>,
    pub seen: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedLlm {
    pub fn new(replies: Vec<anyhow::Result<ChatResponse>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            seen: Mutex::default(),
        }
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn chat_completion(
        &self,
        _model: &str,
        messages: &[ChatMessage],
        _tools: Option<&[ToolSchema]>,
    ) -> anyhow::Result<ChatResponse> {
        self.seen.lock().unwrap().push(messages.to_vec());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow::anyhow!("script exhausted")))
    }
}

pub fn answer(text: &str) -> anyhow::Result<ChatResponse> {
    Ok(ChatResponse {
        content: Some(text.to_string()),
        tool_calls: None,
        finish_reason: Some("stop".to_string()),
    })
}

pub fn call(id: &str, name: &str, arguments: serde_json::Value) -> anyhow::Result<ChatResponse> {
    Ok(ChatResponse {
        content: None,
        tool_calls: Some(vec![ToolCall {
            id: id.to_string(),
            call_type: "function".to_string(),
            function: FunctionCall {
                name: name.to_string(),
                arguments: arguments.to_string(),
            },
        }]),
        finish_reason: Some("tool_calls".to_string()),
    })
}
