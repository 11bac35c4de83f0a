//! Server setup and initialization
//!
//! Builds the application, wires the configured store and runs the server
//! together with the presence sweeper.

use std::sync::Arc;

use axum::Router;
use room_common::{AppConfig, AppError, StoreBackend};
use room_core::SystemClock;
use room_db::{create_pool, ensure_schema, PgMessageRepository, PgParticipantRepository};
use room_service::{ServiceContext, ServiceContextBuilder, Sweeper, SweeperSettings};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// # Errors
/// Returns a configuration error if the rate limit cannot be built.
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();

    let router = apply_rate_limit(create_router(), &config.rate_limit)?.merge(health_routes());
    let router = apply_middleware(
        router,
        &config.cors,
        config.app.env.is_production(),
        config.request_timeout(),
    );

    Ok(router.with_state(state))
}

/// Connect the configured store and create AppState
///
/// # Errors
/// Returns an error if the database is unreachable or the schema cannot be created.
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let clock = Arc::new(SystemClock);

    match config.store.backend {
        StoreBackend::Memory => {
            info!("Using in-memory store");
            Ok(AppState::new(ServiceContext::in_memory(clock), config))
        }
        StoreBackend::Postgres => {
            let database = config
                .store
                .database
                .as_ref()
                .ok_or_else(|| AppError::Config("DATABASE_URL is required".to_string()))?;

            info!("Connecting to PostgreSQL...");
            let db_config = room_db::DatabaseConfig::from(database);
            let pool = create_pool(&db_config)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");

            if database.auto_migrate {
                ensure_schema(&pool)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
            }

            let service_context = ServiceContextBuilder::new()
                .participant_repo(Arc::new(PgParticipantRepository::new(pool.clone())))
                .message_repo(Arc::new(PgMessageRepository::new(pool.clone())))
                .clock(clock)
                .build()
                .map_err(|e| AppError::Config(e.to_string()))?;

            Ok(AppState::new(service_context, config).with_pool(pool))
        }
    }
}

/// Run the HTTP server until `shutdown` resolves
///
/// # Errors
/// Returns an error if the listener fails.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), AppError>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(AppError::Serve)
}

/// Run the complete server with configuration
///
/// Connects the store, starts the sweeper, serves until Ctrl-C or SIGTERM,
/// then stops the sweeper and closes the pool.
///
/// # Errors
/// Returns an error if start-up fails or the server stops abnormally.
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();
    let settings = SweeperSettings::from(&config.presence);

    let state = create_app_state(config).await?;
    let app = create_app(state.clone())?;

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::bind(addr.as_str(), e))?;
    info!("Server listening on http://{}", addr);

    let sweeper = Sweeper::spawn(state.shared_context(), settings);

    let result = serve(listener, app, shutdown_signal()).await;

    sweeper.shutdown().await;
    if let Some(pool) = state.pool() {
        pool.close().await;
        info!("PostgreSQL pool closed");
    }
    info!("Server stopped");

    result
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
