use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use scooter_rental::config::{DatabaseConfig, EnvironmentConfig, PricingPolicy};
use scooter_rental::database::DatabaseConnection;
use scooter_rental::routes::create_app;
use scooter_rental::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("scooter_rental=debug,tower_http=info")),
        )
        .init();

    info!("🛴 Scooter Rental API");
    info!("====================");

    let config = EnvironmentConfig::from_env().context("invalid server configuration")?;
    let db_config = DatabaseConfig::from_env().context("invalid database configuration")?;

    let db = match DatabaseConnection::connect(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("❌ Database connection failed: {}", e);
            return Err(anyhow::anyhow!("database error: {}", e));
        }
    };
    db.run_migrations().await.context("failed to apply migrations")?;

    let pricing = match config.pricing_policy {
        PricingPolicy::PerMinute => "per-minute",
        PricingPolicy::Hourly => "hourly",
    };
    info!("💶 Pricing policy: {}", pricing);
    info!("🌍 Environment: {}", config.environment);

    let addr = config.server_url();
    let state = AppState::new(db.pool().clone(), config);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("🌐 Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Server error: {}", e);
            e
        })?;

    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Ctrl+C received, shutting down...");
        },
        _ = terminate => {
            info!("🛑 SIGTERM received, shutting down...");
        },
    }
}
