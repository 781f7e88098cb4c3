use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, sqlite::SqlitePool};
use tracing::{debug, warn};

use cart_core::{CartItem, CartRepository, RepositoryError, Town};

use crate::decimal::{decimal_to_f64, get_decimal};

/// Fixed key the whole cart is saved under in `local_store`.
const CART_KEY: &str = "cartItems";

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    /// Load and execute all SQL seed files from the specified directory.
    /// Files are executed in alphabetical order by filename.
    pub async fn run_seeds(
        &self,
        seeds_dir: &Path,
    ) -> Result<()> {
        let mut entries: Vec<_> = std::fs::read_dir(seeds_dir)
            .with_context(|| format!("Failed to read seeds directory '{}'", seeds_dir.display()))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "sql"))
            .collect();

        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let sql = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read seed file '{}'", path.display()))?;

            sqlx::raw_sql(&sql)
                .execute(&self.pool)
                .await
                .with_context(|| format!("Failed to execute seed file '{}'", path.display()))?;
        }

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn row_to_town(row: &sqlx::sqlite::SqliteRow) -> Result<Town, RepositoryError> {
    Ok(Town {
        name: row
            .try_get("name")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        fee: get_decimal(row, "fee")?,
    })
}

#[async_trait]
impl CartRepository for SqliteRepository {
    async fn load_cart(&self) -> Result<Vec<CartItem>, RepositoryError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM local_store WHERE key = ?")
                .bind(CART_KEY)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let Some((raw,)) = row else {
            debug!("no saved cart");
            return Ok(Vec::new());
        };

        // A value that does not decode is treated the same as no value at
        // all. The next save overwrites it.
        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!(error = %e, "saved cart is not decodable, starting empty");
                Ok(Vec::new())
            }
        }
    }

    async fn save_cart(&self, items: &[CartItem]) -> Result<(), RepositoryError> {
        let value = serde_json::to_string(items)
            .map_err(|e| RepositoryError::Database(format!("Failed to encode cart: {}", e)))?;

        sqlx::query(
            "INSERT INTO local_store (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(CART_KEY)
        .bind(&value)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(())
    }

    async fn list_towns(&self) -> Result<Vec<Town>, RepositoryError> {
        let rows = sqlx::query("SELECT name, fee FROM towns ORDER BY rowid")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_town).collect()
    }

    async fn get_town(&self, name: &str) -> Result<Town, RepositoryError> {
        let row = sqlx::query("SELECT name, fee FROM towns WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?
            .ok_or(RepositoryError::NotFound)?;

        row_to_town(&row)
    }

    async fn upsert_town(&self, town: &Town) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO towns (name, fee) VALUES (?, ?)
             ON CONFLICT(name) DO UPDATE SET fee = excluded.fee",
        )
        .bind(&town.name)
        .bind(decimal_to_f64(town.fee))
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(())
    }
}
