//! Currency Agent - interactive entry point.

use currency_agent::{agent::Agent, config::Config, repl};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    dotenv::dotenv().ok();

    // stdout belongs to the conversation; logs go to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "currency_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;
    info!("Loaded configuration: model={}", config.default_model);

    let agent = Agent::new(config)?;

    repl::run(&agent, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;

    Ok(())
}
