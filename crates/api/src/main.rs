use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use colcalc_db::{CalculationStore, MemoryCalculationStore, PgCalculationStore};
use colcalc_monday::{MondayAccessorFactory, MondayClientFactory};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use colcalc_api::config::{ServerConfig, StoreBackend};
use colcalc_api::router::build_app_router;
use colcalc_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "colcalc_api=debug,colcalc_monday=debug,tower_http=debug".into());
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Calculation store ---
    let store: Arc<dyn CalculationStore> = match &config.store {
        StoreBackend::Postgres { database_url } => {
            let pool = colcalc_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            colcalc_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            colcalc_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgCalculationStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory calculation store; history is lost on restart");
            Arc::new(MemoryCalculationStore::new())
        }
    };

    // --- Platform client ---
    let clients = MondayClientFactory::new(
        config.monday.api_url.clone(),
        config.monday.api_version.clone(),
        Duration::from_secs(config.monday.http_timeout_secs),
    )
    .expect("Failed to build monday HTTP client");
    tracing::info!(api_url = %config.monday.api_url, api_version = %config.monday.api_version, "monday client configured");

    // --- App state ---
    let config = Arc::new(config);
    let state = AppState::new(
        Arc::clone(&config),
        store,
        Arc::new(MondayAccessorFactory::new(clients)),
    );

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or SIGTERM to initiate graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
