use std::sync::Arc;

use marquee_search::{
    config::Config,
    db::{create_redis_client, Cache},
    routes::{create_router, AppState},
    services::{CorrectionTable, TitleSearcher, TmdbProvider},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marquee_search=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let (cache, cache_writer) = match config.redis_url.as_deref() {
        Some(redis_url) => {
            let (cache, handle) = Cache::new(create_redis_client(redis_url)?);
            tracing::info!("Search page cache enabled");
            (Some(cache), Some(handle))
        }
        None => {
            tracing::info!("REDIS_URL not set, search page cache disabled");
            (None, None)
        }
    };

    let provider = TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.tmdb_language.clone(),
        cache,
    );
    let searcher = TitleSearcher::new(
        Arc::new(provider),
        CorrectionTable::default(),
        config.ranking(),
    );

    let app = create_router(Arc::new(AppState::new(searcher)));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_writer {
        handle.shutdown().await;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
