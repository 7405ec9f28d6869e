mod browse;
mod cli;
mod render;

use clap::Parser;
use sf_client::init_logging;
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let logger = init_logging(level);
    cli::run(cli, logger).await
}
