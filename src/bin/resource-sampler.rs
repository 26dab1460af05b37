//! resource-sampler - appends memory and disk usage to a log file once per
//! interval, forever. Exits with status 1 if the log file is unusable.

use anyhow::Result;
use clap::Parser;
use log::{error, info};
use sysbeat::{cli::SamplerCli, config::Config, disk::StatvfsFs, sampler::ResourceSampler};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = SamplerCli::parse();

    let config = Config::load(&cli).unwrap_or_else(|err| {
        // Manually initialize logger for this specific error
        env_logger::init();
        error!("Failed to load configuration: {}", err);
        std::process::exit(1);
    });

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Resource sampler starting up...");
    info!("-------------------- Configuration --------------------");
    info!("Log Level: {}", config.log_level);
    info!("Stats Log: {}", config.sampler.log_path.display());
    info!("Memory Info: {}", config.sampler.meminfo_path.display());
    info!("Disk Path: {}", config.sampler.disk_path.display());
    info!("Interval: {}ms", config.sampler.interval_ms);
    info!("-------------------------------------------------------");

    let sampler = ResourceSampler::new(config.sampler, StatvfsFs);
    // Only a fatal log error gets us here; it is reported on stderr.
    let never = sampler.run().await?;
    match never {}
}
