//! Core application

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tokio::net::TcpListener;

use crate::api::{self, AppState};
use crate::core::cli;
use crate::core::config::RuntimeConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};

pub struct CoreApp {
    pub config: RuntimeConfig,
    pub pool: SqlitePool,
}

impl CoreApp {
    /// Run the demo server with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let cli_config = cli::parse();
        let config = RuntimeConfig::load(&cli_config)?;
        let app = Self::init(config).await?;
        app.serve().await
    }

    async fn init(config: RuntimeConfig) -> Result<Self> {
        // An in-memory database lives only as long as its single connection
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&config.database_url)
            .await
            .with_context(|| format!("Failed to open database {}", config.database_url))?;

        api::articles::migrate(&pool)
            .await
            .context("Failed to create articles table")?;
        api::articles::seed(&pool)
            .await
            .context("Failed to seed articles")?;

        tracing::debug!(database = %config.database_url, "Database ready");
        Ok(Self { config, pool })
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    async fn serve(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);
        let router = api::router(AppState {
            pool: self.pool.clone(),
            paging: self.config.paging,
        });

        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!(
            address = %addr,
            page_size_default = self.config.paging.default_size,
            page_size_max = self.config.paging.max_size,
            "Listening"
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        self.pool.close().await;
        tracing::info!("Shutdown complete");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
