use std::sync::Arc;

use anyhow::Context;

use inkpost_api::app::{build_app, services::AppServices};
use inkpost_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    inkpost_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let services = AppServices::from_config(&config)
        .await
        .context("failed to initialise stores")?;

    let app = build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
