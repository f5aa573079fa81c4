use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use skycast::{AppState, SkycastConfig, config::LoggingConfig, telemetry, web};

/// Server-rendered weather lookup
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listening port
    #[arg(short, long)]
    port: Option<u16>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let mut config = match SkycastConfig::load_from_path(cli.config) {
        Ok(config) => config,
        Err(e) => {
            telemetry::init(&LoggingConfig::default());
            tracing::error!("ERROR: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    telemetry::init(&config.logging);

    tracing::info!(
        "Skycast v{} starting ({}-day forecast, air quality: {}, alerts: {})",
        skycast::VERSION,
        config.weather.forecast_days,
        config.weather.include_air_quality,
        config.weather.include_alerts
    );

    let state = match AppState::from_config(config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialise: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = web::run(state).await {
        tracing::error!("{e:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
