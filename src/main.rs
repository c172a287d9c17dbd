#![warn(clippy::all, clippy::pedantic)]

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tokio::io::BufReader;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use titanchat::providers::create_backend;
use titanchat::session::{run_once, run_repl};
use titanchat::{Cli, Config, Session};

fn init_logging(level: &str) -> Result<()> {
    let level = level
        .trim()
        .parse::<Level>()
        .map_err(|_| anyhow::anyhow!("invalid log level {level:?}"))?;
    // stderr keeps log lines out of the chat transcript.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_or_init_at(path)?,
        None => Config::load_or_init()?,
    };
    config.apply_env_overrides();
    cli.apply_overrides(&mut config);
    config.validate()?;

    init_logging(cli.log_level(&config.log_level))?;
    tracing::debug!(config = %config.config_path.display(), "configuration loaded");

    let backend = create_backend(&config)?;
    let mut session = Session::new(
        backend,
        config.system_prompt.clone(),
        config.session.on_backend_error,
    );

    let mut stdout = tokio::io::stdout();
    let end = match cli.message.as_deref() {
        Some(message) => run_once(&mut session, message, &mut stdout).await?,
        None => run_repl(&mut session, BufReader::new(tokio::io::stdin()), &mut stdout).await?,
    };
    Ok(end.exit_code())
}
