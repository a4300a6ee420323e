//! Command-line bootstrap for the charity data generator.

use anyhow::{Context, Result};
use charity_datagen::{
    CharityDataGenerator, GenerationSummary, GeneratorConfig, MemorySink, StorageSink,
};
use charity_store_duckdb::DuckDbSink;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug, Clone)]
#[command(name = "charity-gen")]
#[command(about = "Populate a charity database with synthetic donors and gifts", long_about = None)]
#[command(group(ArgGroup::new("target").required(true).args(["database", "dry_run"])))]
pub struct Args {
    /// DuckDB database file path
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Generate into memory without touching a database
    #[arg(long)]
    pub dry_run: bool,

    /// Number of donors to generate
    #[arg(long, default_value_t = 100)]
    pub donors: usize,

    /// Mean number of gifts per donor
    #[arg(long, default_value_t = 3.0)]
    pub gifts_per_donor: f64,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log every donor and gift
    #[arg(long, short)]
    pub verbose: bool,
}

impl Args {
    /// Map the flags onto a generator configuration.
    pub fn generator_config(&self) -> GeneratorConfig {
        let config = GeneratorConfig::new(self.donors, self.gifts_per_donor);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    /// Open the sink the flags select.
    pub fn open_sink(&self) -> Result<Box<dyn StorageSink>> {
        match &self.database {
            Some(path) if !self.dry_run => {
                let sink = DuckDbSink::open(path)
                    .with_context(|| format!("Failed to open database {:?}", path))?;
                info!("Writing to {}", path.display());
                Ok(Box::new(sink))
            }
            _ => {
                info!("Dry run: generating into memory");
                Ok(Box::new(MemorySink::new()))
            }
        }
    }
}

/// Run one generation pass into `sink`.
pub fn run_with_sink<S: StorageSink>(
    config: GeneratorConfig,
    sink: S,
) -> Result<GenerationSummary> {
    let mut generator =
        CharityDataGenerator::new(config, sink).context("Invalid generator configuration")?;
    info!(
        "Using seed {} for {} donors",
        generator.seed(),
        generator.config().donor_count
    );

    generator.generate().context("Data generation failed")
}

/// Run one generation pass as described by the command-line flags.
pub fn run(args: &Args) -> Result<GenerationSummary> {
    let sink = args.open_sink()?;
    run_with_sink(args.generator_config(), sink)
}
