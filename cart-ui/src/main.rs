use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use cart_core::db::{DbConfig, RepositoryRegistry};
use cart_core::{CartSession, CartStore, ShippingTable};
use cart_db_sqlite::SqliteRepositoryFactory;
use cart_ui::config::{FileConfig, Settings};
use cart_ui::{CartApp, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Terminal shopping cart with database-backed state.
///
/// The cart survives restarts: every change is written straight to the
/// configured database, and startup restores whatever was saved last.
#[derive(Debug, Parser)]
#[command(name = "cart-manager", version)]
struct Cli {
    /// Database backend to use.
    #[arg(long)]
    backend: Option<String>,

    /// Database connection string.
    /// For SQLite this is a file path (e.g. `cart.db`) or `:memory:`.
    #[arg(long)]
    database: Option<String>,

    /// Path to a TOML config file. Defaults to `./cart.toml` when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append log records to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter directive (e.g. `debug` or `cart_core=trace`).
    /// Setting this also turns on stderr log output.
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> FileConfig {
        FileConfig {
            backend: self.backend.clone(),
            database: self.database.clone(),
            log_file: self.log_file.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

// ─── configuration ───────────────────────────────────────────────────────────

const DEFAULT_CONFIG_PATH: &str = "cart.toml";

/// An explicitly named config file must exist; the default one may not.
fn load_file_config(cli: &Cli) -> Result<FileConfig> {
    if let Some(path) = &cli.config {
        return FileConfig::load(path);
    }
    let default = Path::new(DEFAULT_CONFIG_PATH);
    if default.is_file() {
        return FileConfig::load(default);
    }
    Ok(FileConfig::default())
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let file = load_file_config(&cli)?;
    let settings = Settings::from_layers(cli.overrides(), file);

    logging::init(settings.log_file.as_deref(), settings.log_level.as_deref())?;

    let db_config = DbConfig {
        backend: settings.backend,
        connection_string: settings.database,
    };

    debug!("connecting to {} backend", db_config.backend);
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));
    let repo = registry.create(&db_config).await?;

    let mut shipping = ShippingTable::builtin();
    for town in repo.list_towns().await? {
        shipping.upsert(town);
    }
    info!(towns = shipping.len(), "shipping table ready");

    let store = CartStore::load(repo).await?;
    let session = CartSession::new(shipping);

    CartApp::new(store, session).run().await
}
