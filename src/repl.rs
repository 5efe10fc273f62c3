//! Interactive read-eval-print loop.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::agent::Agent;

const WELCOME: &str =
    "Welcome to the Currency Converter Agent! Type your query to convert currencies.";
const EXIT_HINT: &str = "Type 'exit' to quit.";

/// Read queries from `input` until `exit` or EOF, answering each on `output`.
pub async fn run<R, W>(agent: &Agent, input: R, mut output: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output
        .write_all(format!("{}\n{}\n", WELCOME, EXIT_HINT).as_bytes())
        .await?;

    let mut lines = input.lines();

    loop {
        output.write_all(b"\nYou: ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        if line.to_lowercase() == "exit" {
            output.write_all(b"Goodbye!\n").await?;
            break;
        }

        if line.trim().is_empty() {
            continue;
        }

        let text = match agent.run(&line).await {
            Ok(reply) => {
                tracing::debug!("Answered with {} tool calls", reply.steps.len());
                reply.output
            }
            Err(e) => {
                tracing::error!("Agent failed: {:#}", e);
                format!("Agent error: {}", e)
            }
        };

        output.write_all(render_response(&text).as_bytes()).await?;
    }

    output.flush().await?;
    Ok(())
}

/// Delimited block around the agent's final answer.
pub fn render_response(text: &str) -> String {
    let rule = "=".repeat(50);
    format!("\n{rule}\nAgent Final Response:\n{text}\n{rule}\n\n")
}
