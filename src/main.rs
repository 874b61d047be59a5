use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitals_bridge::{AppState, Config, RedisStore, Result, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    // Загружаем .env файл
    dotenvy::dotenv().ok();

    // Инициализация логирования
    setup_tracing();

    let config = Config::from_env().map_err(|e| {
        tracing::error!("Invalid configuration: {}", e);
        e
    })?;

    tracing::info!("Using key-value store at {}", config.store.addr);
    match config.cache_ttl_seconds {
        Some(ttl) => tracing::info!("Ingested readings expire after {}s", ttl),
        None => tracing::info!("Ingested readings do not expire"),
    }

    let store = Arc::new(RedisStore::new(config.store.clone()));
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
    });

    // Создание router
    let app = create_router(state);

    let addr: SocketAddr = config.server_addr.parse().map_err(|e| {
        tracing::error!("Invalid server address: {}", e);
        e
    })?;

    // Настройка адреса для прослушивания
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        tracing::error!("Failed to bind address: {}", e);
        e
    })?;

    tracing::info!("Vitals bridge starting on {}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  - POST /api/push - Ingest telemetry readings");
    tracing::info!("  - GET  /api/get  - Latest stored readings");
    tracing::info!("  - GET  /health   - Health check");

    // Запуск сервера с graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            tracing::error!("Server error: {}", e);
            e
        })?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutdown signal received");
    }
}

fn setup_tracing() {
    // Используем EnvFilter::from_default_env() для правильной обработки RUST_LOG
    // Если RUST_LOG не установлена, используем "info" по умолчанию
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
