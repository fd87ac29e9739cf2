//! Couture clients standalone binary.

use std::process::ExitCode;

use clap::Parser;
use couture_store::{ClientsArgs, cli};

#[tokio::main]
async fn main() -> ExitCode {
    let args = ClientsArgs::parse();

    match cli::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
