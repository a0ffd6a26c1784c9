//! Shared setup for the integration tests.
#![allow(dead_code)]

use hvac_viz_core::{HeadlessSurface, Visualization, VizConfig};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Default configuration with a fixed telemetry seed.
pub fn seeded_config(seed: u64) -> VizConfig {
    VizConfig {
        seed: Some(seed),
        ..VizConfig::default()
    }
}

pub fn headless(config: VizConfig) -> Visualization<HeadlessSurface> {
    Visualization::new(config, HeadlessSurface::new()).expect("valid configuration")
}
