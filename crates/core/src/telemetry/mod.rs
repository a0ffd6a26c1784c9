//! Airflow telemetry
//!
//! A [`TelemetrySource`] produces whole [`AirflowSample`]s. [`run_telemetry`]
//! polls a source on a fixed period and publishes each sample into a
//! single-slot `watch` channel, so readers only ever see complete samples and
//! always the most recent one.

mod mock;

pub use mock::MockTelemetry;

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::core_types::AirflowSample;
use crate::runtime::Shutdown;

/// Producer of airflow readings.
///
/// The mock generator implements this; a real sensor subscription would too.
pub trait TelemetrySource: Send {
    fn next_sample(&mut self) -> AirflowSample;
}

impl<T: TelemetrySource + ?Sized> TelemetrySource for Box<T> {
    fn next_sample(&mut self) -> AirflowSample {
        (**self).next_sample()
    }
}

/// Publish a fresh sample every `period` until shutdown.
///
/// The first sample is published one full period after start, like a
/// repeating timer. The loop also ends once every receiver is gone.
///
/// # Returns
///
/// Number of samples published.
pub async fn run_telemetry<T: TelemetrySource>(
    mut source: T,
    period: Duration,
    tx: watch::Sender<AirflowSample>,
    mut shutdown: Shutdown,
) -> u64 {
    info!("Telemetry started, period {:?}", period);

    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut ticks = 0u64;

    loop {
        tokio::select! {
            biased;
            () = shutdown.recv() => break,
            () = tx.closed() => {
                debug!("All telemetry receivers dropped");
                break;
            }
            _ = ticker.tick() => {
                let sample = source.next_sample();
                tx.send_replace(sample);
                ticks += 1;
                debug!("Telemetry tick {}: {}", ticks, sample);
            }
        }
    }

    info!("Telemetry stopped after {} samples", ticks);
    ticks
}
