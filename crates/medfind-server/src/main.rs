mod api;
mod middleware;

use std::sync::Arc;

use medfind_search::SearchEngine;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = medfind_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = medfind_db::PoolConfig::from_app_config(&config);
    let pool = medfind_db::connect_pool(&config.database_url, pool_config).await?;
    medfind_db::run_migrations(&pool).await?;

    let catalog = medfind_db::PgCatalog::new(pool.clone());
    let engine = Arc::new(SearchEngine::new(catalog.clone(), catalog));
    let app = build_app(AppState { pool, engine });

    tracing::info!(addr = %config.bind_addr, env = %config.env, "starting medfind server");
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
