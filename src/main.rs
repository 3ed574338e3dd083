use anyhow::Context;
use client::Client;
use config::Config;
use log::LevelFilter;
use sensor::Sensor;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

mod client;
mod config;
mod reading;
mod sensor;
mod simulator;
#[cfg(test)]
mod test_server;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    TermLogger::init(
        LevelFilter::Info,
        ConfigBuilder::new()
            .set_time_format_rfc3339()
            .set_time_offset_to_local()
            .map_err(|_| anyhow::anyhow!("Failed to set time offset to local"))?
            .build(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("Failed to initialize logger")?;

    if let Err(e) = run().await {
        log::error!("{e:#}");
    }

    Ok(())
}

pub async fn run() -> Result<(), anyhow::Error> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let client = Client::new(&config).context("Failed to initialize client")?;
    let sensor = match config.seed {
        Some(seed) => Sensor::with_seed(seed),
        None => Sensor::new(),
    };

    log::info!("Starting sensor data simulator");
    log::info!("Sending to: {}", client.endpoint());
    log::info!("Interval: {} seconds", config.interval.as_secs());
    log::info!("Press Ctrl+C to stop");

    if config.skip_probe {
        log::info!("Skipping endpoint probe");
    } else if let Err(e) = client.probe().await {
        log::warn!("Endpoint probe failed, continuing anyway: {e:#}");
    } else {
        log::info!("Endpoint is reachable");
    }

    let simulation = tokio::spawn(simulator::simulate(
        sensor,
        client,
        config.interval,
        config.max_readings,
    ));

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to wait for Ctrl+C signal")?;
            log::info!("Stopped by user");
        }
        result = simulation => {
            result.context("Simulation task failed")?;
        }
    }

    Ok(())
}
