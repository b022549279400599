use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

use k1s0_immunization_server::adapter::handler::{self, AppState};
use k1s0_immunization_server::adapter::repository::{
    DosePostgresRepository, InMemoryStore, PatientPostgresRepository, PostgresStoreHealth,
    VaccinePostgresRepository,
};
use k1s0_immunization_server::infrastructure::config::Config;
use k1s0_immunization_server::infrastructure::database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .init();

    let config_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/config.yaml".to_string());
    let cfg = Config::load(&config_path)?;

    info!(
        app_name = %cfg.app.name,
        version = %cfg.app.version,
        environment = %cfg.app.environment,
        "starting immunization server"
    );

    // ストア: DATABASE_URL またはデータベース設定があれば PostgreSQL、なければインメモリ
    let (max_conns, acquire_timeout) = cfg
        .database
        .as_ref()
        .map_or((10, 5), |db| (db.max_open_conns, db.acquire_timeout_secs));
    let database_url = std::env::var("DATABASE_URL")
        .ok()
        .or_else(|| cfg.database.as_ref().map(|db| db.connection_url()));

    let state = if let Some(url) = database_url {
        let pool = Arc::new(database::connect(&url, max_conns, acquire_timeout).await?);
        database::apply_schema(&pool).await?;
        AppState::new(
            Arc::new(PatientPostgresRepository::new(pool.clone())),
            Arc::new(VaccinePostgresRepository::new(pool.clone())),
            Arc::new(DosePostgresRepository::new(pool.clone())),
            Arc::new(PostgresStoreHealth::new(pool)),
        )
    } else {
        warn!("no database configured, using in-memory store");
        let store = Arc::new(InMemoryStore::new());
        AppState::new(store.clone(), store.clone(), store.clone(), store)
    };

    let app = handler::router(state);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "REST server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
