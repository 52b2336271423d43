use std::path::PathBuf;

use clap::Parser;
use courier::config::Config;
use courier::server;

#[derive(Debug, Parser)]
#[command(name = "courier", version, about = "Minimal HTTP/1.1 file and echo server")]
struct Cli {
    /// Directory served under /files/
    #[arg(long)]
    directory: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:4221
    #[arg(long)]
    listen: Option<String>,

    /// YAML configuration file
    #[arg(long, env = "COURIER_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load(),
    };
    if let Some(directory) = cli.directory {
        cfg.server.directory = directory;
    }
    if let Some(listen) = cli.listen {
        cfg.server.listen_addr = listen;
    }
    cfg.validate()?;

    server::listener::run(&cfg, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    })
    .await
}
