use std::path::PathBuf;

use clap::Parser;

use personnel_registry::{export, state};
use sqlx::sqlite::SqlitePoolOptions;

/// Dump every user and their personnel to a JSON file.
#[derive(Debug, Parser)]
#[command(name = "personnel-export", version)]
struct Args {
    /// SQLite database to read from.
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://site.db?mode=rwc")]
    database_url: String,

    /// Destination file; overwritten if it exists.
    #[arg(short, long, default_value = export::DEFAULT_OUTPUT)]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "personnel_registry=info".to_string());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = Args::parse();

    let pool = SqlitePoolOptions::new().max_connections(1);
    let db = state::connect(&args.database_url, pool).await?;
    state::migrate(&db).await?;

    export::export_to_file(&db, &args.output).await?;
    Ok(())
}
