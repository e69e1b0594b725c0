//! mltools decision-tree trainer CLI
//!
//! Loads a CSV dataset, preprocesses it, trains an ID3 decision tree and
//! reports its accuracy on held-out rows.

use anyhow::{Context, Result};
use clap::Parser;
use mltools_trainer::{load_csv, Trainer, TrainerConfig};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "mltools-train")]
#[command(author = "mltools Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Train and evaluate an ID3 decision tree on CSV data", long_about = None)]
struct Args {
    /// Input CSV dataset path
    #[arg(short, long)]
    input: PathBuf,

    /// TOML configuration file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// First CSV record holds column names
    #[arg(long)]
    headers: bool,

    /// Label column index (default: last column)
    #[arg(long)]
    label_column: Option<usize>,

    /// Comma-separated candidate feature columns (default: all but the label)
    #[arg(long, value_delimiter = ',')]
    features: Option<Vec<usize>>,

    /// Maximum tree depth
    #[arg(long)]
    max_depth: Option<usize>,

    /// Fraction of rows held out for evaluation
    #[arg(long)]
    test_fraction: Option<f64>,

    /// Seed for deterministic shuffling
    #[arg(long)]
    seed: Option<u64>,

    /// Skip dataset shuffling
    #[arg(long)]
    no_shuffle: bool,

    /// Write a JSON evaluation report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Print the trained tree to stdout
    #[arg(long)]
    print_tree: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut TrainerConfig) {
        if self.headers {
            config.data.has_headers = true;
        }
        if let Some(label) = self.label_column {
            config.data.label_column = Some(label);
        }
        if let Some(features) = &self.features {
            config.data.features = Some(features.clone());
        }
        if let Some(depth) = self.max_depth {
            config.tree.max_depth = depth;
        }
        if let Some(fraction) = self.test_fraction {
            config.split.test_fraction = fraction;
        }
        if let Some(seed) = self.seed {
            config.split.seed = seed;
        }
        if self.no_shuffle {
            config.split.shuffle = false;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("mltools decision-tree trainer v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &args.config {
        Some(path) => TrainerConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => TrainerConfig::default(),
    };
    args.apply_overrides(&mut config);
    config.validate().context("Invalid configuration")?;

    info!("Loading dataset from: {}", args.input.display());
    let data = load_csv(&args.input, &config.csv_options()).context("Failed to load dataset")?;
    info!("Loaded {} rows with {} columns", data.rows.len(), data.width());

    info!("Training configuration:");
    info!("  Max depth: {}", config.tree.max_depth);
    info!("  Test fraction: {}", config.split.test_fraction);
    info!("  Shuffle: {} (seed {})", config.split.shuffle, config.split.seed);
    info!("  Preprocessing steps: {}", config.preprocessing.len());

    let trainer = Trainer::new(config);
    let outcome = trainer.run(data).context("Training failed")?;

    info!("Training complete!");
    info!("  Nodes: {}", outcome.tree.node_count());
    info!("  Leaves: {}", outcome.tree.leaf_count());
    info!("  Depth: {}", outcome.tree.depth());

    if args.print_tree {
        print!("{}", outcome.tree.display_with(outcome.headers.as_deref()));
    }

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&outcome.report())
            .context("Failed to serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!("Report written to: {}", path.display());
    }

    Ok(())
}
