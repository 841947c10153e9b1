//! Adapter registry
//!
//! Adapters are registered under their `(protocol, product, chain)` key. The
//! registry is built once at startup from configuration: one RPC reader per
//! configured chain, then every enabled product that has a deployment there.

use crate::adapter::{AdapterKey, AdapterParams, ProtocolAdapter};
use crate::error::{AdapterError, Result};
use crate::protocols::stargate::{vesting, StargateVestingAdapter};
use crate::rpc::{ContractReader, Web3Reader};
use adapters_config::AdaptersConfig;
use metadata_cache::MetadataCache;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use types::{Chain, Protocol};

#[derive(Default)]
pub struct AdapterRegistry {
    adapters: BTreeMap<AdapterKey, Arc<dyn ProtocolAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects a second adapter for the same key
    pub fn register(&mut self, adapter: Arc<dyn ProtocolAdapter>) -> Result<()> {
        let key = adapter.key().clone();
        if self.adapters.contains_key(&key) {
            return Err(AdapterError::DataInconsistency(format!(
                "adapter {} registered twice",
                key
            )));
        }

        debug!("Registered adapter {}", key);
        self.adapters.insert(key, adapter);
        Ok(())
    }

    pub fn get(&self, key: &AdapterKey) -> Option<Arc<dyn ProtocolAdapter>> {
        self.adapters.get(key).cloned()
    }

    pub fn by_chain(&self, chain: Chain) -> Vec<Arc<dyn ProtocolAdapter>> {
        self.filter(Some(chain), None)
    }

    pub fn by_protocol(&self, protocol: Protocol) -> Vec<Arc<dyn ProtocolAdapter>> {
        self.filter(None, Some(protocol))
    }

    /// `None` matches everything
    pub fn filter(
        &self,
        chain: Option<Chain>,
        protocol: Option<Protocol>,
    ) -> Vec<Arc<dyn ProtocolAdapter>> {
        self.adapters
            .iter()
            .filter(|(key, _)| chain.map_or(true, |chain| key.chain == chain))
            .filter(|(key, _)| protocol.map_or(true, |protocol| key.protocol == protocol))
            .map(|(_, adapter)| adapter.clone())
            .collect()
    }

    pub fn all(&self) -> Vec<Arc<dyn ProtocolAdapter>> {
        self.adapters.values().cloned().collect()
    }

    pub fn keys(&self) -> impl Iterator<Item = &AdapterKey> {
        self.adapters.keys()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

type BuildFn = fn(AdapterParams, &AdaptersConfig) -> Result<Arc<dyn ProtocolAdapter>>;

/// A product that can be instantiated per chain
struct ProductFactory {
    protocol: Protocol,
    product: &'static str,
    default_chains: fn() -> Vec<Chain>,
    build: BuildFn,
}

fn build_stargate_vesting(
    params: AdapterParams,
    config: &AdaptersConfig,
) -> Result<Arc<dyn ProtocolAdapter>> {
    Ok(Arc::new(StargateVestingAdapter::from_config(params, config)?))
}

const PRODUCTS: &[ProductFactory] = &[ProductFactory {
    protocol: Protocol::Stargate,
    product: vesting::PRODUCT,
    default_chains: StargateVestingAdapter::supported_chains,
    build: build_stargate_vesting,
}];

/// Connect to every configured chain and register all available products
pub fn build_registry(
    config: &AdaptersConfig,
    cache: Arc<MetadataCache>,
) -> Result<AdapterRegistry> {
    let mut readers: BTreeMap<Chain, Arc<dyn ContractReader>> = BTreeMap::new();

    for chain in config.configured_chains() {
        let Some(settings) = config.chain(chain) else {
            continue;
        };
        let reader = Web3Reader::new(
            &settings.rpc_url,
            Duration::from_millis(settings.timeout_ms),
        )?;
        readers.insert(chain, Arc::new(reader));
    }

    build_registry_with_readers(config, cache, &readers)
}

/// Same as [`build_registry`] with caller-supplied readers
pub fn build_registry_with_readers(
    config: &AdaptersConfig,
    cache: Arc<MetadataCache>,
    readers: &BTreeMap<Chain, Arc<dyn ContractReader>>,
) -> Result<AdapterRegistry> {
    let mut registry = AdapterRegistry::new();

    for (chain, reader) in readers {
        for factory in PRODUCTS {
            if !config.is_enabled(factory.protocol, factory.product) {
                debug!("{}/{} disabled by configuration", factory.protocol, factory.product);
                continue;
            }

            let deployed = (factory.default_chains)().contains(chain)
                || config
                    .contract_override(factory.protocol, factory.product, *chain)
                    .is_some();
            if !deployed {
                continue;
            }

            let params = AdapterParams {
                reader: reader.clone(),
                chain: *chain,
                protocol: factory.protocol,
                cache: cache.clone(),
            };
            registry.register((factory.build)(params, config)?)?;
        }
    }

    if registry.is_empty() {
        warn!("No adapters registered; check the [chains] section of the configuration");
    } else {
        info!("Registered {} adapters across {} chains", registry.len(), readers.len());
    }

    Ok(registry)
}
