//! PostgreSQL connection
//!
//! Owns the pool and applies the embedded migrations at startup.

use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;

/// Database handle shared by the application
#[derive(Clone)]
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Connect using `config`
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        info!("🔌 Connecting to {}", mask_database_url(&config.url));
        let pool = config.create_pool().await?;
        info!("✅ Database connected ({} max connections)", config.max_connections);
        Ok(Self { pool })
    }

    /// Apply pending migrations from `./migrations`
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("✅ Migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Hide credentials in a database URL before logging it
pub fn mask_database_url(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    let Some(at_pos) = url.rfind('@') else {
        return url.to_string();
    };
    if at_pos < scheme_end {
        return url.to_string();
    }

    let protocol = &url[..scheme_end + 3];
    let host = &url[at_pos + 1..];
    format!("{}***:***@{}", protocol, host)
}
