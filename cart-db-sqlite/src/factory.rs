use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use cart_core::db::repository::{CartRepository, RepositoryError};
use cart_core::db::{DbConfig, RepositoryFactory};

use crate::repository::SqliteRepository;

/// Resolve the seeds directory at runtime so it works in both development and
/// packaged distribution.
///
/// Resolution order:
/// 1. **`CART_DB_SQLITE_SEEDS_DIR`** — if set, use this path (override for
///    packagers or custom layouts).
/// 2. **`./seeds`** — if the directory exists in the current working directory.
/// 3. **Crate manifest dir** — `$CARGO_MANIFEST_DIR/seeds` as last resort
///    (dev/tests when run from the build tree).
fn seeds_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CART_DB_SQLITE_SEEDS_DIR") {
        return PathBuf::from(dir);
    }
    let cwd_seeds = PathBuf::from("./seeds");
    if cwd_seeds.is_dir() {
        return cwd_seeds;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("seeds")
}

/// Map a connection string onto the URL form sqlx expects.
///
/// * a string already carrying the `sqlite:` scheme passes through unchanged
/// * `":memory:"` becomes an ephemeral in-memory database
/// * a bare file path is opened read-write and created if missing
fn sqlite_url(connection_string: &str) -> String {
    if connection_string.starts_with("sqlite:") {
        return connection_string.to_string();
    }
    if connection_string == ":memory:" {
        return "sqlite::memory:".to_string();
    }
    format!("sqlite:{}?mode=rwc", connection_string)
}

/// [`RepositoryFactory`] for SQLite.
///
/// Register this with a [`cart_core::db::RepositoryRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use cart_core::db::RepositoryRegistry;
/// use cart_db_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::new();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// ```
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database described by `config.connection_string` (see
    /// [`sqlite_url`] for the accepted forms), run migrations, then load
    /// seed SQL if a seeds directory is present (see [`seeds_dir`]).
    ///
    /// A missing seeds directory is not an error. The built-in shipping
    /// table covers the default towns, so seeds only matter for installs
    /// that want extra rows preloaded.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn CartRepository>, RepositoryError> {
        let url = sqlite_url(&config.connection_string);
        let repo = SqliteRepository::new(&url)
            .await
            .map_err(|e| RepositoryError::Connection(format!("{e:#}")))?;
        repo.run_migrations()
            .await
            .map_err(|e| RepositoryError::Database(format!("{e:#}")))?;

        let seeds = seeds_dir();
        if seeds.is_dir() {
            repo.run_seeds(&seeds)
                .await
                .map_err(|e| RepositoryError::Database(format!("{e:#}")))?;
        } else {
            debug!(dir = %seeds.display(), "no seeds directory, skipping");
        }

        Ok(Box::new(repo))
    }
}
