//! CLI module for couture-server.
//!
//! This module provides the command-line interface that can be used either
//! as a standalone binary or as a subcommand of the main couture-rs CLI.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use couture_config::{
    CliOverrides, Config, LoggingConfig, apply_overrides, load_config, validate_config,
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{CancellationToken, run_with_shutdown};

/// Couture server CLI arguments.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "couture-server",
    version,
    about = "REST server for tailoring client records"
)]
pub struct ServerArgs {
    /// Config file path (json/jsonc/yaml/toml). Built-in defaults when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: CliOverrides,
}

/// Load the config file (or defaults), then apply overrides and validate.
pub fn resolve_config(args: &ServerArgs) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    apply_overrides(&mut config, &args.overrides);
    validate_config(&config)?;
    Ok(config)
}

/// Run the couture server with the given arguments.
///
/// This is the main entry point for the server CLI, used by both the
/// standalone binary and the unified couture-rs CLI.
pub async fn run(args: ServerArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(&args)?;

    init_tracing(&config.logging);
    info!(config = ?args.config, listen = %config.server.listen, "starting couture server");

    // Set up graceful shutdown on SIGTERM/SIGINT
    let shutdown = CancellationToken::new();
    let shutdown_signal = shutdown.clone();

    tokio::spawn(async move {
        shutdown_signal_handler().await;
        info!("shutdown signal received");
        shutdown_signal.cancel();
    });

    run_with_shutdown(config, shutdown).await?;
    Ok(())
}

/// Wait for shutdown signals (SIGTERM, SIGINT).
async fn shutdown_signal_handler() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {}", e);
            // Fall back to waiting forever
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

/// Build the `EnvFilter` directive string: base level, then per-module overrides.
fn filter_directives(config: &LoggingConfig) -> String {
    let mut filter_str = config.level.as_deref().unwrap_or("info").to_string();

    // Sorted so the directive string is stable across runs.
    let mut modules: Vec<_> = config.filters.iter().collect();
    modules.sort();
    for (module, level) in modules {
        filter_str.push(',');
        filter_str.push_str(module);
        filter_str.push('=');
        filter_str.push_str(level);
    }
    filter_str
}

/// Initialize tracing subscriber with the given logging configuration.
///
/// Supports:
/// - `level`: Base log level (trace, debug, info, warn, error)
/// - `format`: Output format (json, pretty, compact). Default: pretty
/// - `output`: Output target (stdout, stderr). Default: stderr
/// - `filters`: Per-module log level overrides
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_new(filter_directives(config))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let format = config.format.as_deref().unwrap_or("pretty");
    let output = config.output.as_deref().unwrap_or("stderr");

    // try_init: a second call (tests, embedding) keeps the first subscriber.
    let _ = match (format, output) {
        ("json", "stdout") => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(io::stdout))
            .try_init(),
        ("json", _) => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(io::stderr))
            .try_init(),
        ("compact", "stdout") => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_writer(io::stdout))
            .try_init(),
        ("compact", _) => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_writer(io::stderr))
            .try_init(),
        (_, "stdout") => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(io::stdout))
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(io::stderr))
            .try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_directives_include_modules() {
        let mut logging = LoggingConfig {
            level: Some("warn".into()),
            ..Default::default()
        };
        logging.filters.insert("sqlx".into(), "error".into());
        logging.filters.insert("couture_store".into(), "debug".into());
        assert_eq!(
            filter_directives(&logging),
            "warn,couture_store=debug,sqlx=error"
        );
        assert_eq!(filter_directives(&LoggingConfig::default()), "info");
    }

    #[test]
    fn resolve_without_file_uses_defaults() {
        let args = ServerArgs::try_parse_from([
            "couture-server",
            "--store",
            "memory:",
            "--listen",
            "127.0.0.1:0",
        ])
        .unwrap();
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.store.location, "memory:");
        assert_eq!(config.server.listen, "127.0.0.1:0");
    }

    #[test]
    fn resolve_rejects_invalid_override() {
        let args =
            ServerArgs::try_parse_from(["couture-server", "--store", "ftp://nope"]).unwrap();
        assert!(resolve_config(&args).is_err());
    }
}
