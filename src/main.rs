//! street-explorer CLI entry point
//!
//! Street photo explorer - search, route and panorama viewer

use street_explorer::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
