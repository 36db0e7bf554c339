//! Trait mapping CLI
//!
//! Resolves a file of clinical trait names and writes the finished
//! mappings and curation files.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trait_mapping::{run_batch, MappingConfig, OutputWriters, TraitFrequencyTable, TraitResolver};

#[derive(Parser)]
#[command(name = "trait-mapping")]
#[command(version)]
#[command(about = "Map clinical trait names to disease ontology terms")]
#[command(long_about = None)]
struct Cli {
    /// Trait names, one occurrence per line or `name<TAB>count`
    #[arg(short, long)]
    input: PathBuf,

    /// Finished mappings TSV to write
    #[arg(long)]
    output_mappings: PathBuf,

    /// Curation TSV to write
    #[arg(long)]
    output_curation: PathBuf,

    /// YAML configuration; defaults are used when omitted
    #[arg(short, long, env = "TRAIT_MAPPING_CONFIG")]
    config: Option<PathBuf>,

    /// Override the bridge's maximum cross-reference distance
    #[arg(long)]
    max_distance: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trait_mapping=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading configuration");
            MappingConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?
        }
        None => MappingConfig::default(),
    };
    let config = config
        .with_max_distance(cli.max_distance)
        .context("Invalid configuration")?;

    let table = TraitFrequencyTable::from_file(&cli.input)
        .with_context(|| format!("Failed to read trait names from {}", cli.input.display()))?;
    if table.is_empty() {
        tracing::warn!(path = %cli.input.display(), "No trait names in input");
    }
    tracing::info!(traits = table.len(), "Trait names loaded");

    let resolver = TraitResolver::from_config(&config).context("Failed to set up clients")?;
    let mut writers = OutputWriters::create(&cli.output_mappings, &cli.output_curation)
        .context("Failed to create output files")?;

    let summary = run_batch(&resolver, &table, &mut writers)
        .await
        .context("Trait resolution failed")?;

    println!("{}", summary);
    Ok(())
}
