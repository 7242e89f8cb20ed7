use chrono::Utc;
use tokio::sync::watch;
use tracing::info;

use hearth_core::HearthConfig;
use hearth_signal::SignalHub;
use hearth_timers::SchedulerEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hearth_hub=info,hearth_timers=info".into()),
        )
        .init();

    // config: explicit HEARTH_CONFIG path > ~/.hearth/hearth.toml
    let config_path = std::env::var("HEARTH_CONFIG").ok();
    let config = HearthConfig::load(config_path.as_deref())?;

    info!(
        latitude = config.location.latitude,
        longitude = config.location.longitude,
        devices = config.devices.len(),
        "hearth starting"
    );

    let hub = SignalHub::new();
    let mut engine = SchedulerEngine::new(
        config.location,
        config.timers.sweep_interval_ms,
        hub.clone(),
    );
    engine.register(&config.devices, Utc::now());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, shutting down");
            let _ = shutdown_tx.send(true);
        }
    });

    engine.run(shutdown_rx).await;
    Ok(())
}
