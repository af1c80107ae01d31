use std::io::ErrorKind;
use std::process::ExitCode;

use tracing::{error, info};

use castfeed::{CastfeedError, Config, WebServer};

/// Default configuration file, overridable with `CASTFEED_CONFIG`.
const DEFAULT_CONFIG_PATH: &str = "config.toml";

fn load_config() -> castfeed::Result<Config> {
    let path =
        std::env::var("CASTFEED_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let mut config = match Config::load(&path) {
        Ok(config) => config,
        Err(CastfeedError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            eprintln!("{path} not found, using default configuration.");
            Config::default()
        }
        Err(e) => return Err(e),
    };

    config.apply_env_overrides()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    // Optional local environment file
    let _ = dotenvy::from_filename(".env.local");

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    if let Err(e) = castfeed::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        castfeed::logging::init_console_only(&config.logging.level);
    }

    info!("castfeed - Podcast RSS feed server");

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    let feed = config.feed.build();
    if let Err(e) = feed.validate() {
        error!(dataset = %config.feed.dataset, "Refusing to serve feed: {}", e);
        return ExitCode::FAILURE;
    }
    info!(
        dataset = %config.feed.dataset,
        items = feed.len(),
        cors_origins = ?config.cors_origins(),
        "Feed loaded"
    );

    let server = WebServer::new(&config);
    info!("Server configured on {}", server.bind_addr());

    if let Err(e) = server.run().await {
        error!(error = %e, "failed to start server");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
