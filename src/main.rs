use std::{io::IsTerminal, sync::Arc};

use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use manit_chat::{
    config::Config,
    services::answer_client::HttpAnswerClient,
    ui::repl::{self, ReplOptions},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    // Logs go to stderr; stdout belongs to the chat screen.
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let client = HttpAnswerClient::new(config.endpoint.clone(), config.timeout)?;
    info!(endpoint = %client.endpoint(), timeout = ?config.timeout, "answer service configured");

    let opts = ReplOptions {
        width: config.width,
        history: config.history,
        show_references: config.show_references,
        clear: std::io::stdout().is_terminal(),
    };

    let stdin = BufReader::new(tokio::io::stdin());
    repl::run(Arc::new(client), &opts, stdin, tokio::io::stdout()).await?;
    Ok(())
}
