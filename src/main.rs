use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use riskmap::api::AppState;
use riskmap::config::RiskMapConfig;
use riskmap::dataset::LocationDataset;
use riskmap::risk::DecisionTreeModel;
use riskmap::web;

#[tokio::main]
async fn main() -> Result<()> {
    let config = RiskMapConfig::load().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    info!("Starting riskmap v{}", riskmap::VERSION);

    // Load everything up front, then publish immutable handles; request
    // handlers never touch the filesystem.
    let dataset = Arc::new(
        LocationDataset::load(&config.data.dataset_path)
            .context("Failed to load location dataset")?,
    );
    info!("Dataset ready with {} locations", dataset.len());

    let classifier = Arc::new(
        DecisionTreeModel::load(&config.data.classifier_path)
            .context("Failed to load classifier artifact")?,
    );

    let state = AppState::new(dataset, classifier, &config.engine)
        .context("Failed to assemble risk engine")?;

    web::run(state, config.server.port, &config.server.frontend_dir).await
}
