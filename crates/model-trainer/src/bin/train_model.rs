//! Fit the price regression tree from the clean dataset.

use anyhow::Result;
use clap::Parser;
use model_trainer::{init_logging, train_model, TrainOptions};
use regression_tree::TreeConfig;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "train-model", about = "Train the housing price regression tree")]
struct Args {
    /// Clean dataset to train on
    #[arg(long, default_value = "data/housing_clean.csv")]
    input: PathBuf,

    /// Destination for the persisted model
    #[arg(long, default_value = "models/price_tree.json")]
    model: PathBuf,

    /// Maximum tree depth
    #[arg(long, default_value_t = 4)]
    max_depth: usize,

    /// Fraction of rows held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    test_fraction: f64,

    /// Shuffle seed for the train/test split
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let options = TrainOptions {
        config: TreeConfig {
            max_depth: args.max_depth,
            ..TreeConfig::default()
        },
        test_fraction: args.test_fraction,
        seed: args.seed,
    };

    info!(input = %args.input.display(), "training model");
    let evaluation = train_model(&args.input, &args.model, &options)?;
    println!("{}", serde_json::to_string_pretty(&evaluation)?);

    Ok(())
}
