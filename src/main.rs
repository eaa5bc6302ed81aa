//! Patient records HTTP service entry point.

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use patients_api::api::{create_router, AppState};
use patients_api::config::Config;
use patients_api::db::PatientStore;
use patients_api::error::ServiceError;
use patients_api::metrics;
use patients_api::utils::shutdown_signal;

/// Patient records HTTP service.
#[derive(Parser, Debug)]
#[command(name = "patients-api")]
#[command(about = "CRUD and name search over hospital patient records")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true, env = "LOG_JSON")]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP port, overriding PORT.
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default).
    Serve {
        /// HTTP port, overriding PORT.
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity and database connectivity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("patients_api=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    if args.json_logs {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }

    match args.command {
        Some(Command::Serve { port }) => cmd_serve(port.or(args.port)).await,
        Some(Command::CheckConfig) => cmd_check_config().await,
        None => cmd_serve(args.port).await,
    }
}

/// Load and validate configuration, applying the CLI port override.
fn load_config(port_override: Option<u16>) -> Result<Config, ServiceError> {
    let mut config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    if let Some(port) = port_override {
        config.port = port;
    }

    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        ServiceError::InvalidConfig(e)
    })?;

    Ok(config)
}

/// Serve the patient API until a shutdown signal arrives.
async fn cmd_serve(port_override: Option<u16>) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let config = load_config(port_override)?;
    info!("Configuration loaded successfully");

    let store = PatientStore::connect(&config)
        .await
        .map_err(ServiceError::from)?;
    info!("Database ready");

    let prometheus = if config.enable_metrics {
        Some(metrics::install_recorder().map_err(ServiceError::from)?)
    } else {
        None
    };

    let app_state = AppState::new(store, prometheus);

    let addr = config.socket_addr().map_err(ServiceError::InvalidConfig)?;
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, create_router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

/// Check configuration validity and database connectivity.
async fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("PATIENTS API - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match load_config(None) {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration check failed"));
        }
    };

    print!("Connecting to database... ");
    match PatientStore::connect(&config).await {
        Ok(store) => {
            store.ping().await?;
            println!("OK");
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Database connection failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Database: {}", config.database_url);
    println!("  Max Connections: {}", config.database_max_connections);
    println!("  Listen Address: {}:{}", config.bind_address, config.port);
    println!(
        "  Metrics: {}",
        if config.enable_metrics { "Enabled" } else { "Disabled" }
    );
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}
