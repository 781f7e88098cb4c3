use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use cart_data::ShippingRateLoader;
use cart_db_sqlite::SqliteRepository;
use clap::Parser;

/// Load shipping rate data from a CSV file into the database.
///
/// The CSV file should have the following columns:
/// - town: The town name as shown in the checkout town picker
/// - fee: The flat delivery fee for that town in pesos
#[derive(Parser, Debug)]
#[command(name = "cart-rates-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing shipping rate data
    #[arg(short, long)]
    file: PathBuf,

    /// SQLite database URL (e.g., sqlite:cart.db?mode=rwc to create if missing)
    #[arg(short, long, default_value = "sqlite:cart.db?mode=rwc")]
    database: String,

    /// Run database migrations before loading data
    #[arg(short, long, default_value_t = false)]
    migrate: bool,

    /// Run seed files from the specified directory after migrations
    #[arg(short, long)]
    seeds: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let repo = SqliteRepository::new(&args.database)
        .await
        .with_context(|| format!("Failed to connect to database: {}", args.database))?;

    if args.migrate {
        println!("Running migrations...");
        repo.run_migrations()
            .await
            .context("Failed to run migrations")?;
        println!("Migrations complete.");
    }

    if let Some(seeds_dir) = &args.seeds {
        println!("Running seeds from: {}", seeds_dir.display());
        repo.run_seeds(seeds_dir)
            .await
            .with_context(|| format!("Failed to run seeds from: {}", seeds_dir.display()))?;
        println!("Seeds complete.");
    }

    println!("Loading shipping rates from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = ShippingRateLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} records from CSV", records.len());

    let written = ShippingRateLoader::load(&repo, &records)
        .await
        .context("Failed to load shipping rates into database")?;

    println!(
        "Successfully loaded {} shipping rates into the database.",
        written
    );

    Ok(())
}
