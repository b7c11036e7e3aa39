//! qtpack - release packager for Qt applications.
//!
//! This binary bundles a previously built Qt application with its runtime
//! dependencies into a platform-specific distributable artifact (.zip,
//! .AppImage or .dmg).

mod bundler;
mod cli;
mod error;

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
