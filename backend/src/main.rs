use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use meal_planner_backend::config::Config;
use meal_planner_backend::domain::CalendarService;
use meal_planner_backend::storage::{Connection, MongoConnection};
use meal_planner_backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("meal_planner_backend=info,tower_http=info")),
        )
        .init();

    info!("Connecting to MongoDB database '{}'", config.database_name);
    let connection = MongoConnection::connect(&config.database_url, &config.database_name).await?;
    connection
        .ping()
        .await
        .context("Could not reach MongoDB at startup")?;
    info!("Connected to MongoDB");
    connection.ensure_indexes().await?;

    let allowed_origins = config.cors_origins()?;
    info!("CORS origins: {:?}", config.allowed_origins);

    let app_state = initialize_backend(
        Arc::new(connection),
        CalendarService::new(),
        config.app_password.clone(),
    );
    let app = create_router(app_state, allowed_origins);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Server running on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
