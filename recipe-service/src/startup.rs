//! Application startup and lifecycle management.

use crate::config::{DatabaseBackend, RecipeConfig};
use crate::services::{Database, InMemoryRepository, IngredientRepository, JwtService};
use crate::{build_router, AppState};
use axum::Router;
use secrecy::ExposeSecret;
use service_core::error::AppError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

/// Application container for managing server lifecycle.
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Connect the store, bind the listener and assemble the router.
    ///
    /// Port 0 binds a random port, which tests rely on.
    pub async fn build(config: RecipeConfig) -> Result<Self, AppError> {
        let repository = connect_repository(&config).await?;
        let jwt = JwtService::new(&config.jwt)?;

        let state = AppState::new(repository, jwt);
        let router = build_router(state, config.swagger_enabled);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(port = port, "Recipe service listening");

        Ok(Self { listener, router })
    }

    /// Serve until SIGINT/SIGTERM, then drain in-flight requests.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Service shutdown complete");
        Ok(())
    }
}

async fn connect_repository(
    config: &RecipeConfig,
) -> Result<Arc<dyn IngredientRepository>, AppError> {
    match config.database.backend {
        DatabaseBackend::Postgres => {
            let url = config.database.url.as_ref().ok_or_else(|| {
                AppError::ConfigError(anyhow::anyhow!("DATABASE_URL is required for postgres"))
            })?;

            let db = Database::new(
                url.expose_secret(),
                config.database.max_connections,
                config.database.min_connections,
            )
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to PostgreSQL: {}", e);
                e
            })?;
            db.run_migrations().await?;

            Ok(Arc::new(db))
        }
        DatabaseBackend::Memory => {
            tracing::warn!("Using in-memory ingredient store; data is lost on restart");
            Ok(Arc::new(InMemoryRepository::new()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
