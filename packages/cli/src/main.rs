#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Regenerates the encampment map.
//!
//! Downloads the encampment spreadsheet, validates its rows, and writes
//! `encampments_map.html` and `version.json` into the current working
//! directory. A failed download aborts the run before anything is written.

mod pipeline;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "encampment_map",
    version,
    about = "Regenerate the student encampments map from the shared spreadsheet"
)]
struct Cli {}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = encampment_map_cli_utils::init_logger();
    Cli::parse();

    let out_dir = std::env::current_dir()?;
    pipeline::run(&multi, &out_dir).await?;

    Ok(())
}
