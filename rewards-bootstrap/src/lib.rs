pub mod context;
pub mod lifecycle;
pub mod telemetry;

use tracing::info;

use rewards_infrastructure::AppConfig;

pub use lifecycle::run_standalone;

/// Loads configuration, installs tracing and serves until shutdown.
pub async fn run() -> anyhow::Result<()> {
    let config = AppConfig::load().await?;
    let _telemetry = telemetry::init_tracing(config.log_format, config.log_dir.as_deref())?;
    info!(
        source = %config.source.as_deref().unwrap_or("<defaults>"),
        bind_addr = %config.bind_addr,
        store_backend = ?config.store_backend,
        timezone = %config.timezone,
        "config loaded"
    );
    run_standalone(config).await
}
