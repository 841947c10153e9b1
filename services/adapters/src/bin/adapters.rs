//! Protocol adapters CLI
//!
//! Builds the adapter registry from configuration and runs one capability
//! across the selected adapters. Results go to stdout as JSON, logs to stderr.

use adapters_config::{defaults, AdaptersConfig};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use metadata_cache::MetadataCache;
use protocol_adapters::{build_registry, portfolio, AdapterRegistry, Capability, ProtocolAdapter};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use types::{Address, Chain, GetPositionsInput, Protocol};

#[derive(Parser)]
#[command(name = "adapters", about = "Query DeFi protocol adapters", version)]
struct Cli {
    /// Base configuration file
    #[arg(long, default_value = defaults::CONFIG_PATH)]
    config: PathBuf,

    /// Environment overlay, e.g. `production`
    #[arg(long)]
    env: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open positions of a user
    Positions {
        /// User address (0x-prefixed hex)
        #[arg(long, value_parser = parse_address)]
        user: Address,

        /// Read at this block instead of latest
        #[arg(long)]
        block: Option<u64>,

        #[command(flatten)]
        select: Selection,
    },

    /// Protocol tokens of every selected adapter
    ProtocolTokens {
        #[command(flatten)]
        select: Selection,
    },

    /// Which capabilities each adapter implements
    Capabilities {
        #[command(flatten)]
        select: Selection,
    },

    /// Rebuild cached metadata and overwrite what is stored
    BuildMetadata {
        #[command(flatten)]
        select: Selection,
    },

    /// Print the effective configuration
    Config,
}

#[derive(Args)]
struct Selection {
    #[arg(long)]
    chain: Option<Chain>,

    #[arg(long)]
    protocol: Option<Protocol>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CapabilityReport {
    adapter: String,
    supported: Vec<Capability>,
    not_implemented: Vec<Capability>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RebuildReport {
    adapter: String,
    rebuilt: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn parse_address(value: &str) -> std::result::Result<Address, String> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    let bytes = hex::decode(digits).map_err(|e| format!("invalid address {:?}: {}", value, e))?;
    if bytes.len() != 20 {
        return Err(format!("invalid address {:?}: expected 20 bytes, got {}", value, bytes.len()));
    }
    Ok(Address::from_slice(&bytes))
}

fn init_logging(config: &AdaptersConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.global.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_cache(config: &AdaptersConfig) -> Arc<MetadataCache> {
    if config.global.persist_metadata {
        info!("📁 Metadata cache directory: {:?}", config.global.cache_dir);
        Arc::new(MetadataCache::with_file_store(&config.global.cache_dir))
    } else {
        info!("Metadata persistence disabled; using in-memory cache");
        Arc::new(MetadataCache::in_memory())
    }
}

fn select(
    registry: &AdapterRegistry,
    selection: &Selection,
) -> Result<Vec<Arc<dyn ProtocolAdapter>>> {
    let adapters = registry.filter(selection.chain, selection.protocol);
    if adapters.is_empty() {
        bail!(
            "no adapters match chain={:?} protocol={:?} ({} registered)",
            selection.chain,
            selection.protocol,
            registry.len()
        );
    }
    Ok(adapters)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to render output")?
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AdaptersConfig::load(Some(&cli.config), cli.env.as_deref())
        .with_context(|| format!("Failed to load configuration from {:?}", cli.config))?;
    init_logging(&config);

    if let Command::Config = cli.command {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let cache = open_cache(&config);
    let registry = build_registry(&config, cache.clone())?;

    match &cli.command {
        Command::Positions { user, block, select: selection } => {
            let input = GetPositionsInput {
                user_address: *user,
                block_number: *block,
            };
            let results = portfolio::positions(&select(&registry, selection)?, &input).await;
            print_json(&results)?;
        }

        Command::ProtocolTokens { select: selection } => {
            let results = portfolio::protocol_tokens(&select(&registry, selection)?).await;
            print_json(&results)?;
        }

        Command::Capabilities { select: selection } => {
            let reports: Vec<CapabilityReport> = select(&registry, selection)?
                .iter()
                .map(|adapter| {
                    let (supported, not_implemented): (Vec<Capability>, Vec<Capability>) =
                        Capability::ALL
                            .iter()
                            .partition(|capability| adapter.supports(**capability));
                    CapabilityReport {
                        adapter: adapter.key().to_string(),
                        supported,
                        not_implemented,
                    }
                })
                .collect();
            print_json(&reports)?;
        }

        Command::BuildMetadata { select: selection } => {
            let mut reports = Vec::new();
            for adapter in select(&registry, selection)? {
                let adapter_name = adapter.key().to_string();
                let report = match adapter.rebuild_metadata().await {
                    Ok(rebuilt) => {
                        info!("✅ {} metadata rebuilt: {}", adapter_name, rebuilt);
                        RebuildReport {
                            adapter: adapter_name,
                            rebuilt,
                            error: None,
                        }
                    }
                    Err(e) => {
                        warn!("Failed to rebuild metadata for {}: {}", adapter_name, e);
                        RebuildReport {
                            adapter: adapter_name,
                            rebuilt: false,
                            error: Some(e.to_string()),
                        }
                    }
                };
                reports.push(report);
            }
            print_json(&reports)?;
        }

        Command::Config => {}
    }

    debug!("📊 Metadata cache stats: {:?}", cache.stats());
    Ok(())
}
