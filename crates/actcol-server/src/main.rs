mod api;
mod middleware;

use std::sync::Arc;

use actcol_sheets::{BrandCatalog, SheetSourceConfig};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = actcol_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if config.sheet_url.is_none() {
        tracing::warn!(
            "GOOGLE_SHEETS_PUBLISHED_URL not set; brand endpoints will fail until it is configured"
        );
    }

    let catalog = BrandCatalog::new(SheetSourceConfig::from_app_config(&config))?;
    let app = build_app(AppState {
        catalog: Arc::new(catalog),
    });

    tracing::info!(
        env = %config.env,
        bind_addr = %config.bind_addr,
        revalidate_secs = config.revalidate_secs,
        "starting brand catalog server"
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
