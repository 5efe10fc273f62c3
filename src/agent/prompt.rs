//! System prompt for the currency agent.

use crate::tools::ToolRegistry;

/// Build the system prompt with tool definitions.
pub fn build_system_prompt(tools: &ToolRegistry) -> String {
    let tool_descriptions = tools
        .list_tools()
        .iter()
        .map(|t| format!("- **{}**: {}", t.name, t.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a helpful assistant that converts amounts between currencies.

You understand both 3-letter currency codes (e.g. 'USD', 'EUR') and common currency names or symbols (e.g. 'dollar', '$', 'rupee', '₹').

## Tools
{tool_descriptions}

## Rules
1. If the user gives a currency name or symbol, call 'get_currency_code' first to find its 3-letter code.
2. Always call 'convert_currency' to get the final conversion. Never compute rates yourself.
3. If a tool returns an error, explain it to the user plainly."#,
        tool_descriptions = tool_descriptions
    )
}
