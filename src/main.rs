//! Main entry point for the Rally PTI service
//!
//! Initializes configuration and logging, serves the calculation endpoint
//! and shuts down gracefully on SIGINT/SIGTERM.

use anyhow::Result;
use clap::Parser;
use rally_pti::api::{ApiServer, ApiServerConfig, ApiState};
use rally_pti::config::{validate_config, AppConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

/// Rally PTI Service - doubles rating adjustment calculator
#[derive(Parser)]
#[command(
    name = "rally-pti",
    version,
    about = "PTI rating adjustment service for the Rally league platform",
    long_about = "Rally PTI serves the Player Tracking Index calculator over HTTP. \
                 It rates a completed doubles match from both teams' summed ratings, \
                 the winners' experience and the set scores, and reports every \
                 player's rating before and after."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// HTTP host override
    #[arg(long, value_name = "HOST", help = "Override HTTP bind address")]
    http_host: Option<String>,

    /// HTTP port override
    #[arg(long, value_name = "PORT", help = "Override HTTP server port")]
    http_port: Option<u16>,

    /// Base K-factor override
    #[arg(long, value_name = "K", help = "Override the base K-factor (default 5.59)")]
    base_k_factor: Option<f64>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(
        long,
        help = "Validate configuration and exit without starting service"
    )]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C) signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}

/// Display startup banner with service information
fn display_startup_banner(config: &AppConfig) {
    info!("Rally PTI Service");
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    info!("   HTTP: {}", config.http_addr());
    info!("   Base K-factor: {}", config.rating.base_k_factor);
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(http_host) = &args.http_host {
        config.service.http_host = http_host.clone();
    }

    if let Some(http_port) = args.http_port {
        config.service.http_port = http_port;
    }

    if let Some(k) = args.base_k_factor {
        config.rating.base_k_factor = k;
    }

    validate_config(&config)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    // Initialize logging early (before any other operations)
    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if args.dry_run {
        info!("Configuration validation successful");
        display_startup_banner(&config);
        info!("Dry run completed - exiting without starting service");
        return Ok(());
    }

    display_startup_banner(&config);

    let state = match ApiState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    let server = Arc::new(ApiServer::new(ApiServerConfig::from(&config), state));

    let mut server_task = {
        let server = server.clone();
        tokio::spawn(async move { server.start().await })
    };

    info!("Rally PTI Service is running");

    tokio::select! {
        _ = wait_for_shutdown_signal() => {
            info!("Shutdown signal received, beginning graceful shutdown...");
        }
        result = &mut server_task => {
            // The server only returns on its own when it failed to start
            match result {
                Ok(Ok(())) => info!("API server exited"),
                Ok(Err(e)) => error!("API server failed: {:#}", e),
                Err(e) => error!("API server task panicked: {}", e),
            }
            std::process::exit(1);
        }
    }

    server.stop().await?;

    match tokio::time::timeout(config.shutdown_timeout(), server_task).await {
        Ok(Ok(Ok(()))) => info!("Graceful shutdown completed successfully"),
        Ok(Ok(Err(e))) => warn!("API server reported an error during shutdown: {}", e),
        Ok(Err(e)) => warn!("API server task failed during shutdown: {}", e),
        Err(_) => warn!("Shutdown timeout exceeded, forcing exit"),
    }

    info!("Rally PTI Service stopped");
    Ok(())
}
