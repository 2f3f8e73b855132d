use std::net::SocketAddr;
use std::sync::Arc;

use labdash::config::{AppConfig, DocumentBackend};
use labdash::store::{Documents, MemoryDocumentStore, PgDocumentStore};
use labdash::AppState;
use mimalloc::MiMalloc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// M-MIMALLOC-APP: Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "labdash=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env()?;

    let documents = match (config.document_backend, config.database_url.as_deref()) {
        (DocumentBackend::Postgres, Some(url)) => {
            let pool = labdash::db::create_pool(url, config.database_max_connections).await?;
            labdash::db::run_migrations(&pool).await?;
            Documents::Postgres(PgDocumentStore::new(pool))
        }
        (DocumentBackend::Postgres, None) => {
            anyhow::bail!("DATABASE_URL is required for the postgres backend")
        }
        (DocumentBackend::Memory, _) => {
            tracing::warn!("Using in-memory document store; data is not persisted");
            Documents::Memory(Arc::new(MemoryDocumentStore::new()))
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!(host = %addr, backend = documents.backend_name(), "Starting labdash API server");

    let app = labdash::routes::router(AppState { documents, config });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
