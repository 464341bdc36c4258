use activities::config::Config;
use activities::{logging, server};
use activities_core::storage::{DatabaseStorage, InMemoryStorage, Storage};
use activities_core::DatabaseManager;
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "activities")]
#[command(about = "Activity management REST API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Default)]
struct DatabaseArgs {
    /// Database file (overrides config and ACTIVITIES_DB)
    #[arg(long)]
    database: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the REST API server
    Serve {
        /// Address to bind (overrides config and ACTIVITIES_HOST)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides config and ACTIVITIES_PORT)
        #[arg(short, long)]
        port: Option<u16>,
        #[command(flatten)]
        db: DatabaseArgs,
        /// Keep activities in memory only; nothing is persisted
        #[arg(long, conflicts_with = "database")]
        in_memory: bool,
    },
    /// Create or upgrade the database schema
    Migrate {
        #[command(flatten)]
        db: DatabaseArgs,
    },
    /// Delete every activity from the database
    ClearDatabase {
        #[command(flatten)]
        db: DatabaseArgs,
    },
}

fn database_path(config: &Config, args: &DatabaseArgs) -> String {
    args.database
        .clone()
        .unwrap_or_else(|| config.database.path.clone())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let _log_guard = logging::init_logging();

    let cli = Cli::parse();
    let mut config = Config::load()?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            db,
            in_memory,
        } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let storage: Arc<dyn Storage> = if in_memory {
                warn!("Using in-memory storage; activities are lost on exit");
                Arc::new(InMemoryStorage::new())
            } else {
                let path = database_path(&config, &db);
                Arc::new(DatabaseStorage::open(&path).await?)
            };

            server::start_server(storage, config.socket_addr()?).await?;
        }
        Commands::Migrate { db } => {
            let path = database_path(&config, &db);
            let manager = DatabaseManager::open(&path).await?;
            manager.run_migrations().await?;
            info!("Database at {} is up to date", path);
        }
        Commands::ClearDatabase { db } => {
            let path = database_path(&config, &db);
            let manager = DatabaseManager::open(&path).await?;
            manager.run_migrations().await?;
            let deleted = manager.clear_all_data().await?;
            info!("Removed {} activities from {}", deleted, path);
        }
    }

    Ok(())
}
