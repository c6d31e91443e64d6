//! Clean the raw housing dataset and write the sanitized copy.

use anyhow::Result;
use clap::Parser;
use model_trainer::{clean_dataset, init_logging};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "clean-dataset", about = "Sanitize the raw housing dataset")]
struct Args {
    /// Raw dataset to clean
    #[arg(long, default_value = "data/housing_raw.csv")]
    input: PathBuf,

    /// Destination for the clean dataset
    #[arg(long, default_value = "data/housing_clean.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    info!(input = %args.input.display(), "cleaning dataset");
    let report = clean_dataset(&args.input, &args.output)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
