use clap::Parser;
use std::env;
use tracing::{info, Level};
use tracing_subscriber::{fmt, fmt::time::ChronoUtc, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use calculator_server::{create_app, CalculatorServer, ServerConfig};
use error_common::{log_error, Result, ServiceError};

/// Dental treatment cost estimator HTTP server
#[derive(Parser, Debug)]
#[command(name = "calculator-server")]
#[command(about = "HTTP API for dental treatment cost estimates")]
struct Args {
    /// Server bind address (overrides configuration)
    #[arg(long)]
    host: Option<String>,

    /// Server port (overrides configuration)
    #[arg(short, long)]
    port: Option<u16>,

    /// Configuration file path
    #[arg(short, long, default_value = "calculator-server.yaml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_tracing(args.verbose)?;

    if let Err(err) = run(args).await {
        log_error("calculator-server", &err);
        return Err(err);
    }
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let mut config = ServerConfig::load(&args.config)?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        config_file = %args.config,
        waive_deductible_for_preventive = config.policy.waive_deductible_for_preventive,
        rounding_scale = config.policy.rounding_scale,
        "Starting {}",
        config.name
    );

    let bind_address = config.bind_address();
    let server = CalculatorServer::new(config)?;
    let app = create_app(server);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .map_err(|e| ServiceError::NetworkError(format!("Failed to bind to {bind_address}: {e}")))?;

    info!("Calculator API listening on http://{}", bind_address);
    info!("Treatment estimates at http://{}/api/v1/calculate-treatment", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServiceError::ServerError(format!("HTTP server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("calculator_server={level},treatment_calculator={level},tower_http=info").into()
    });

    // Structured JSON logs in production, human-readable otherwise
    let production = env::var("CALCULATOR_ENV").is_ok_and(|value| value == "production");

    let registry = tracing_subscriber::registry().with(env_filter);
    let initialized = if production {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .json(),
            )
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_timer(ChronoUtc::rfc_3339()))
            .try_init()
    };

    initialized.map_err(|e| ServiceError::InternalError(format!("Failed to initialize tracing: {e}")))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(err) => {
            tracing::error!(error = %err, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
