//! `users-api` binary.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use marci_telemetry::{init_logging, LogFormat};
use users_api::Settings;

#[derive(Debug, Parser)]
#[command(name = "users-api")]
#[command(about = "Example Marci service", long_about = None)]
struct Cli {
    /// Settings file (TOML).
    #[arg(short, long, env = "MARCI_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on.
    #[arg(short, long)]
    port: Option<u16>,

    /// Mount point of the users routes.
    #[arg(long)]
    prefix: Option<String>,

    /// Log output: json, pretty or compact.
    #[arg(long)]
    log_format: Option<LogFormat>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    if let Some(port) = cli.port {
        settings.server = settings.server.with_port(port);
    }
    if let Some(prefix) = cli.prefix {
        settings.prefix = prefix;
    }
    if let Some(format) = cli.log_format {
        settings.logging = settings.logging.with_format(format);
    }

    init_logging(&settings.logging).context("initializing logging")?;

    users_api::app(&settings.prefix)
        .listen(settings.server)
        .await
        .context("server failed")?;
    Ok(())
}
