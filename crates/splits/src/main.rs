use std::sync::Arc;

use splits::{calibration::Calibration, config::ServerConfig, run_server};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let config = ServerConfig::from_env();

    let calibration = Calibration::load(config.calibration_path.as_deref())?;
    tracing::info!(
        field_size = calibration.field_size(),
        targets = calibration.targets().len(),
        "Calibration ready"
    );

    run_server(config, Arc::new(calibration)).await
}
