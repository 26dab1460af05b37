//! heartbeat - prints a liveness line once per interval until it receives
//! SIGINT or SIGTERM, then exits with status 0.

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use sysbeat::{cli::HeartbeatCli, config::Config, heartbeat::Heartbeat, shutdown, shutdown::Signals};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = HeartbeatCli::parse();

    let config = Config::load(&cli).unwrap_or_else(|err| {
        // Manually initialize logger for this specific error
        env_logger::init();
        error!("Failed to load configuration: {}", err);
        std::process::exit(1);
    });

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Heartbeat starting up...");
    info!("Log Level: {}", config.log_level);
    info!("Message: {}", config.heartbeat.message);
    info!("Interval: {}ms", config.heartbeat.interval_ms);

    // Installed before the first beat.
    let signals = Signals::install().context("Failed to install signal handlers")?;
    let (trigger, token) = shutdown::channel();
    tokio::spawn(signals.listen(trigger));

    let heartbeat = Heartbeat::new(
        std::io::stdout(),
        config.heartbeat.message.clone(),
        config.heartbeat.interval(),
    );
    heartbeat.run(token).await?;

    info!("Heartbeat shut down. Exiting.");
    Ok(())
}
