use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use resume_builder::cli::{self, Cli};
use resume_builder::core::ConfigManager;
use resume_builder::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Load configuration, then logging, before touching storage
    let config = ConfigManager::load(args.config.as_deref())?;
    logging::init(&config.logging)?;
    ConfigManager::ensure_directories(&config).await?;

    info!(
        "Environment: {}",
        std::env::var("CVDRAFT_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    );
    if args.ephemeral {
        info!("Database: in memory");
    } else {
        info!("Database: {}", config.database_path.display());
    }
    info!("Output: {}", config.output_path.display());

    let (app, db) = cli::open_app(config, args.ephemeral).await?;
    let result = cli::handle_command(args.command, &app).await;
    if let Err(e) = &result {
        error!("Command failed: {:#}", e);
    }

    db.close().await;
    result
}
