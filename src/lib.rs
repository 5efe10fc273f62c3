//! # Currency Agent
//!
//! A conversational currency converter.
//!
//! This library provides:
//! - Currency alias resolution ("dollar", "€", "rupee" → 3-letter codes)
//! - Amount conversion against an exchange-rate provider
//! - A tool-based agent loop driven by an OpenAI-compatible LLM (Groq by default)
//! - An interactive read-eval-print loop
//!
//! ## Architecture
//!
//! The agent follows the "tools in a loop" pattern:
//! 1. Receive a query from the REPL
//! 2. Build context with system prompt and available tools
//! 3. Call LLM, parse response, execute any tool calls
//! 4. Feed results back to LLM, repeat until it answers
//!
//! ## Example
//!
//! ```rust,ignore
//! use currency_agent::{agent::Agent, config::Config};
//!
//! let config = Config::from_env()?;
//! let agent = Agent::new(config)?;
//! let reply = agent.run("How much is 100 dollars in euros?").await?;
//! println!("{}", reply.output);
//! ```

pub mod agent;
pub mod config;
pub mod currency;
pub mod llm;
pub mod repl;
pub mod tools;

pub use config::Config;
