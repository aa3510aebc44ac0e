//! Main entry point for Herald.

use herald_bot::{BotResult, HeraldBot};
use herald_common::init_logging;
use herald_config::ConfigLoader;
use tracing::{error, info};

#[tokio::main]
async fn main() -> BotResult<()> {
    // A missing .env file is fine; the environment may already be set.
    let dotenv = dotenvy::dotenv();

    let config = ConfigLoader::load()?;
    let _log_guard = init_logging(&config.logging)?;

    if let Ok(path) = dotenv {
        info!(path = %path.display(), "Loaded environment file");
    }
    info!(version = env!("CARGO_PKG_VERSION"), "Starting Herald");

    let bot = HeraldBot::new(config);
    tokio::select! {
        result = bot.start() => {
            if let Err(e) = &result {
                error!("Bot stopped with an error: {}", e);
            }
            result
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
            Ok(())
        }
    }
}
