// src/main.rs
//
// Replay host: resolves the configured vehicle, then feeds the recorded
// snapshots through the alert state machine one cycle at a time.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use chrysler_profile::config::Config;
use chrysler_profile::{resolve, CarInterface};

fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.yaml".to_string());
    let config = Config::load(&config_path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("chrysler_profile={}", config.logging.level)));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("✓ Configuration loaded from {}", config_path);

    let vehicle = &config.vehicle;
    let params = resolve(vehicle.variant, &vehicle.firmware, &vehicle.fingerprint())
        .context("Session initialization failed")?;
    println!("{}", serde_json::to_string_pretty(&params)?);

    if config.cycles.is_empty() {
        warn!("No cycles to replay");
        return Ok(());
    }

    let mut car = CarInterface::new(Arc::new(params), config.alerts);
    let mut alert_cycles = 0usize;
    for snapshot in &config.cycles {
        let out = car.update(snapshot);
        if !out.events.is_empty() {
            alert_cycles += 1;
        }
        println!("{}", serde_json::to_string(&out)?);
    }

    info!(
        "Replayed {} cycles, {} with events",
        config.cycles.len(),
        alert_cycles
    );
    Ok(())
}
