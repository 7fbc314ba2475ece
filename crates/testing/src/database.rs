//! Test database setup.
//!
//! Connects to the PostgreSQL server named by `TEST_DATABASE_URL` (falling
//! back to `DATABASE_URL`) and applies the catalog schema once per process.

use anyhow::Context;
use sqlx::Executor;
use tokio::sync::OnceCell;

use catalog_common::telemetry::init_tracing;
use catalog_infrastructure::{DatabaseConfig, DatabasePool, Store};

const SCHEMA: &str = include_str!("schema.sql");

const TABLES: [&str; 8] = [
    "reviews",
    "articles",
    "books",
    "audio",
    "videos",
    "tags",
    "authors",
    "directions",
];

static SCHEMA_APPLIED: OnceCell<()> = OnceCell::const_new();

/// Test database wrapper with the catalog schema applied
pub struct TestDatabase {
    pool: DatabasePool,
}

impl TestDatabase {
    /// Connect using `TEST_DATABASE_URL` or `DATABASE_URL`.
    pub async fn from_env() -> anyhow::Result<Self> {
        let url = std::env::var("TEST_DATABASE_URL")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .context("TEST_DATABASE_URL or DATABASE_URL must point at a PostgreSQL server")?;
        Self::new_with_url(&url).await
    }

    /// Connect to `connection_string` and make sure the schema exists.
    pub async fn new_with_url(connection_string: &str) -> anyhow::Result<Self> {
        // Another test may have installed the subscriber already.
        let _ = init_tracing("catalog-tests", false, "warn");

        let config = DatabaseConfig::test_config(connection_string.to_string());
        let pool = DatabasePool::new(&config).await?;

        SCHEMA_APPLIED
            .get_or_try_init(|| async {
                pool.pool()
                    .execute(SCHEMA)
                    .await
                    .context("failed to apply the catalog schema")?;
                Ok::<_, anyhow::Error>(())
            })
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the database pool
    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    /// A store backed by this database.
    pub fn store(&self) -> Store {
        Store::new(self.pool.clone())
    }

    /// Remove every row from the catalog tables.
    pub async fn clean(&self) -> anyhow::Result<()> {
        let statement = format!("TRUNCATE TABLE {} CASCADE", TABLES.join(", "));
        self.pool.pool().execute(statement.as_str()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_creates_every_table() {
        for table in TABLES {
            assert!(
                SCHEMA.contains(&format!("CREATE TABLE IF NOT EXISTS {table} (")),
                "missing table {table}"
            );
        }
    }

    #[tokio::test]
    #[ignore] // Requires PostgreSQL to be running
    async fn test_database_creation() {
        let db = TestDatabase::from_env().await.unwrap();
        assert!(db.pool().health_check().await.unwrap().healthy);
        db.clean().await.unwrap();
    }
}
