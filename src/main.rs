use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Arg, Command};
use fleet_sync_config::AppConfig;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app;
mod shutdown;

use app::Application;
use shutdown::ShutdownManager;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("fleet-sync")
        .version("1.0.0")
        .about("Driver roster synchronization service")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path"),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level")
                .value_parser(["trace", "debug", "info", "warn", "error"])
                .default_value("info"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .value_name("FORMAT")
                .help("Log format")
                .value_parser(["json", "pretty"])
                .default_value("pretty"),
        )
        .get_matches();

    let config_path = matches.get_one::<String>("config").map(String::as_str);
    let log_level = matches.get_one::<String>("log-level").unwrap();
    let log_format = matches.get_one::<String>("log-format").unwrap();

    init_logging(log_level, log_format)?;

    info!("starting fleet driver sync service");
    if let Some(path) = config_path {
        info!("config file: {path}");
    }

    // A missing or invalid required setting is fatal: exit non-zero now
    // rather than limp along without endpoints or credentials.
    let config = AppConfig::load(config_path).context("failed to load configuration")?;

    let app = Application::new(config).await?;

    let shutdown_manager = ShutdownManager::new();

    let app_handle = {
        let app = Arc::new(app);
        let shutdown_rx = shutdown_manager.subscribe().await;

        tokio::spawn(async move {
            if let Err(e) = app.run(shutdown_rx).await {
                error!("application failed: {e}");
            }
        })
    };

    wait_for_shutdown_signal().await;

    info!("shutdown signal received, stopping scheduler");
    shutdown_manager.shutdown().await;

    // An in-flight run is allowed to finish its writes; cap the wait so a
    // wedged run cannot hold the process hostage.
    match tokio::time::timeout(Duration::from_secs(30), app_handle).await {
        Ok(result) => {
            if let Err(e) = result {
                error!("error during shutdown: {e}");
            } else {
                info!("service shut down cleanly");
            }
        }
        Err(_) => {
            warn!("shutdown timed out, exiting anyway");
        }
    }

    info!("fleet driver sync service exited");
    Ok(())
}

fn init_logging(log_level: &str, log_format: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match log_format {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()
                .context("failed to initialize json logging")?;
        }
        "pretty" => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()
                .context("failed to initialize pretty logging")?;
        }
        _ => {
            return Err(anyhow::anyhow!("unsupported log format: {log_format}"));
        }
    }

    Ok(())
}

async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("received Ctrl+C");
        },
        _ = terminate => {
            info!("received SIGTERM");
        },
    }
}
