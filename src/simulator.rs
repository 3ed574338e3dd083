use std::time::Duration;

use backon::{ConstantBuilder, Retryable};
use chrono::Local;
use tokio::time::MissedTickBehavior;

use crate::{
    client::{Client, is_retryable},
    sensor::Sensor,
};

pub const RETRY_DELAY: Duration = Duration::from_millis(500);
pub const RETRY_MAX_TIMES: usize = 2;

pub fn retry_builder() -> ConstantBuilder {
    ConstantBuilder::default()
        .with_delay(RETRY_DELAY)
        .with_max_times(RETRY_MAX_TIMES)
}

/// Generates one reading and sends it. Only connection failures are retried,
/// so the endpoint sees at most one POST per reading.
pub async fn tick(sensor: &mut Sensor, client: &Client) -> (u64, Result<(), anyhow::Error>) {
    let (sequence, data) = sensor.measure();
    log::info!("Reading #{sequence} at {}", Local::now().format("%H:%M:%S"));

    let result = (|| client.insert(&data))
        .retry(retry_builder())
        .when(is_retryable)
        .notify(|e, dur| {
            log::error!("{e:#}");
            log::info!("Retrying in {:?}", dur);
        })
        .await;

    match &result {
        Ok(()) => log::info!("Data sent successfully: {}", data.summary()),
        Err(e) => log::error!("Failed to send reading #{sequence}: {e:#}"),
    }

    (sequence, result)
}

/// Ticks every `interval` until `max_readings` readings have been attempted,
/// or forever when there is no limit.
pub async fn simulate(
    mut sensor: Sensor,
    client: Client,
    interval: Duration,
    max_readings: Option<u64>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let (sequence, _) = tick(&mut sensor, &client).await;

        if max_readings.is_some_and(|max| sequence >= max) {
            log::info!("Sent {sequence} readings, stopping");
            break;
        }
    }
}
