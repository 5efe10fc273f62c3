//! Agent module - the LLM tool-calling loop.
//!
//! The agent follows a "tools in a loop" pattern:
//! 1. Build context with system prompt and user query
//! 2. Call LLM with available tools
//! 3. If LLM requests tool calls, execute them in order and feed results back
//! 4. Repeat until LLM produces final response or max iterations reached

mod agent_loop;
mod prompt;

pub use agent_loop::{Agent, AgentReply, AgentStep, ITERATION_LIMIT_OUTPUT};
pub use prompt::build_system_prompt;
