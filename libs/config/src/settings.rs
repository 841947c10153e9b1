//! Adapter Configuration Module
//!
//! Loads adapter settings from TOML files with environment-specific overrides.

use crate::defaults;
use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use types::{Address, Chain, Protocol};

/// Main adapters configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AdaptersConfig {
    /// Global settings
    #[serde(default)]
    pub global: GlobalConfig,

    /// RPC endpoints by chain name; a chain without an entry gets no adapters
    #[serde(default)]
    pub chains: BTreeMap<String, ChainConfig>,

    /// `protocols.<protocol>.<product>` sections
    #[serde(default)]
    pub protocols: BTreeMap<String, BTreeMap<String, ProductConfig>>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GlobalConfig {
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// When false metadata is kept in memory only
    #[serde(default = "default_persist_metadata")]
    pub persist_metadata: bool,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChainConfig {
    pub rpc_url: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProductConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Replaces the built-in deployment address, keyed by chain name
    #[serde(default)]
    pub contracts: BTreeMap<String, Address>,
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            contracts: BTreeMap::new(),
        }
    }
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(defaults::cache::CACHE_DIR)
}

fn default_persist_metadata() -> bool {
    defaults::cache::PERSIST_METADATA
}

fn default_log_level() -> String {
    defaults::LOG_LEVEL.to_string()
}

fn default_timeout_ms() -> u64 {
    defaults::rpc::TIMEOUT_MS
}

fn default_enabled() -> bool {
    true
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            persist_metadata: default_persist_metadata(),
            log_level: default_log_level(),
        }
    }
}

impl AdaptersConfig {
    /// Load configuration from files with environment overrides
    pub fn load(base_path: Option<&Path>, environment: Option<&str>) -> Result<Self> {
        let base = base_path.unwrap_or(Path::new(defaults::CONFIG_PATH));

        let mut builder = Config::builder().add_source(File::from(base).required(true));

        if let Some(env) = environment {
            let env_file = base
                .parent()
                .unwrap_or(Path::new("."))
                .join(defaults::ENVIRONMENTS_DIR)
                .join(format!("{}.toml", env));

            if env_file.exists() {
                info!("Loading environment config: {:?}", env_file);
                builder = builder.add_source(File::from(env_file));
            } else {
                warn!("Environment config not found: {:?}", env_file);
            }
        }

        builder = builder.add_source(Self::environment_source());

        let config = builder
            .build()
            .with_context(|| format!("Failed to build configuration from {:?}", base))?;

        let mut config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.expand_env_vars()?;
        config.validate()?;

        debug!(
            "Loaded configuration with {} chains and {} protocols",
            config.chains.len(),
            config.protocols.len()
        );
        Ok(config)
    }

    /// Parse a TOML document, still honouring `ADAPTERS_` overrides
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .add_source(Self::environment_source())
            .build()
            .context("Failed to build configuration")?;

        let mut config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.expand_env_vars()?;
        config.validate()?;
        Ok(config)
    }

    fn environment_source() -> Environment {
        Environment::with_prefix(defaults::ENV_PREFIX)
            .prefix_separator("_")
            .separator(defaults::ENV_SEPARATOR)
            .try_parsing(true)
    }

    /// Expand `${VAR}` references in RPC URLs and the cache directory
    pub fn expand_env_vars(&mut self) -> Result<()> {
        for (chain, settings) in &mut self.chains {
            let expanded = shellexpand::env(&settings.rpc_url)
                .with_context(|| format!("Failed to expand RPC URL for {}", chain))?;
            settings.rpc_url = expanded.to_string();
        }

        let cache_dir = self.global.cache_dir.to_string_lossy().to_string();
        let expanded = shellexpand::full(&cache_dir).context("Failed to expand cache directory")?;
        self.global.cache_dir = PathBuf::from(expanded.into_owned());

        Ok(())
    }

    /// Section names must be known chains and protocols
    pub fn validate(&self) -> Result<()> {
        for (chain, settings) in &self.chains {
            check_chain_name(chain).with_context(|| format!("chains.{}", chain))?;
            if settings.rpc_url.trim().is_empty() {
                bail!("chains.{}.rpc_url is empty", chain);
            }
            if settings.timeout_ms == 0 {
                bail!("chains.{}.timeout_ms must be positive", chain);
            }
        }

        for (protocol, products) in &self.protocols {
            protocol
                .parse::<Protocol>()
                .map_err(|e| anyhow::anyhow!("protocols.{}: {}", protocol, e))?;
            for (product, settings) in products {
                for chain in settings.contracts.keys() {
                    check_chain_name(chain).with_context(|| {
                        format!("protocols.{}.{}.contracts.{}", protocol, product, chain)
                    })?;
                }
            }
        }
        Ok(())
    }

    pub fn chain(&self, chain: Chain) -> Option<&ChainConfig> {
        self.chains.get(chain.as_str())
    }

    /// Chains with an RPC endpoint, in name order
    pub fn configured_chains(&self) -> Vec<Chain> {
        self.chains
            .keys()
            .filter_map(|name| name.parse().ok())
            .collect()
    }

    pub fn product(&self, protocol: Protocol, product: &str) -> Option<&ProductConfig> {
        self.protocols.get(protocol.as_str())?.get(product)
    }

    /// Products without a section are enabled
    pub fn is_enabled(&self, protocol: Protocol, product: &str) -> bool {
        self.product(protocol, product)
            .map(|settings| settings.enabled)
            .unwrap_or(true)
    }

    pub fn contract_override(
        &self,
        protocol: Protocol,
        product: &str,
        chain: Chain,
    ) -> Option<Address> {
        self.product(protocol, product)?
            .contracts
            .get(chain.as_str())
            .copied()
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to render configuration as TOML")
    }
}

/// Sections are keyed by canonical chain name, not numeric id
fn check_chain_name(name: &str) -> Result<Chain> {
    let chain: Chain = name.parse().map_err(anyhow::Error::msg)?;
    if chain.as_str() != name {
        bail!("use the chain name {:?}", chain.as_str());
    }
    Ok(chain)
}

/// Convenience function to load configuration with defaults
pub fn load_config(environment: Option<&str>) -> Result<AdaptersConfig> {
    AdaptersConfig::load(None, environment)
}
