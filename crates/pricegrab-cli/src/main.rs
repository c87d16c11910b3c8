mod report;
mod scrape;

use clap::{Parser, Subcommand};
use pricegrab_core::{ChangeKind, OutputMode};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pricegrab")]
#[command(about = "Track per-variant prices and stock of retailer product pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch every catalog product and emit its variants
    Scrape {
        /// brief, detailed, csv or db
        #[arg(long, default_value_t = OutputMode::Brief)]
        mode: OutputMode,
    },
    /// Print stored products with their observation history
    Show {
        #[command(subcommand)]
        command: ShowCommands,
    },
    /// Report products whose observations changed
    Changes {
        #[command(subcommand)]
        command: ChangesCommands,
    },
    /// Print the loaded configuration and catalog
    Config,
}

#[derive(Debug, Subcommand)]
enum ShowCommands {
    /// Every stored product
    All,
    /// One product by SKU
    Sku { skuid: String },
    /// Products whose name contains a fragment
    Name { fragment: String },
}

#[derive(Debug, Subcommand)]
enum ChangesCommands {
    /// Latest observation against the closest earlier one that differs
    Ever {
        #[arg(long)]
        json: bool,
    },
    /// Last two observations, when they differ
    Recent {
        #[arg(long)]
        json: bool,
    },
}

impl ChangesCommands {
    fn kind_and_format(&self) -> (ChangeKind, bool) {
        match *self {
            ChangesCommands::Ever { json } => (ChangeKind::Ever, json),
            ChangesCommands::Recent { json } => (ChangeKind::Recent, json),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = pricegrab_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Scrape { mode } => {
            let catalog = pricegrab_core::load_catalog(&config.catalog_path)?;
            let pool = match mode {
                OutputMode::Db => Some(open_store(&config).await?),
                _ => None,
            };
            scrape::run_scrape(&config, &catalog, mode, pool.as_ref()).await?;
        }
        Commands::Show { command } => {
            let pool = open_store(&config).await?;
            match command {
                ShowCommands::All => report::show_all(&pool).await?,
                ShowCommands::Sku { skuid } => report::show_sku(&pool, &skuid).await?,
                ShowCommands::Name { fragment } => report::show_name(&pool, &fragment).await?,
            }
        }
        Commands::Changes { command } => {
            let pool = open_store(&config).await?;
            let (kind, json) = command.kind_and_format();
            report::show_changes(&pool, kind, json).await?;
        }
        Commands::Config => {
            let catalog = pricegrab_core::load_catalog(&config.catalog_path)?;
            report::show_config(&config, &catalog);
        }
    }

    Ok(())
}

async fn open_store(config: &pricegrab_core::AppConfig) -> anyhow::Result<sqlx::SqlitePool> {
    let pool_config = pricegrab_db::PoolConfig::from_app_config(config);
    let pool = pricegrab_db::connect_pool(&config.database_url, pool_config).await?;
    pricegrab_db::ensure_schema(&pool).await?;
    Ok(pool)
}

#[cfg(test)]
mod tests;
