//! Unified couture-rs CLI.
//!
//! This binary provides a unified interface to all couture components:
//! - `couture-rs serve` - Run the REST server
//! - `couture-rs clients` - Manage client records in any store
//!
//! Each subcommand can also be run as a standalone binary.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

/// Couture-rs unified CLI.
#[derive(Parser)]
#[command(
    name = "couture-rs",
    version,
    about = "Client records for a tailoring workshop",
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the REST server.
    #[command(name = "serve", alias = "server")]
    Serve(Box<couture_server::ServerArgs>),

    /// Manage client records.
    #[command(name = "clients")]
    Clients(couture_store::ClientsArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => couture_server::cli::run(*args).await,
        Commands::Clients(args) => couture_store::cli::run(args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
