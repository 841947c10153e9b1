//! Default configuration values
//!
//! Used when a setting is absent from every configuration source.

/// Base configuration file, relative to the working directory
pub const CONFIG_PATH: &str = "config/adapters.toml";

/// Directory holding `<env>.toml` overlays, relative to the base file's directory
pub const ENVIRONMENTS_DIR: &str = "environments";

/// Environment variable prefix; nesting uses `__`
pub const ENV_PREFIX: &str = "ADAPTERS";
pub const ENV_SEPARATOR: &str = "__";

/// Metadata cache defaults
pub mod cache {
    pub const CACHE_DIR: &str = "./data/metadata";

    pub const PERSIST_METADATA: bool = true;
}

/// RPC defaults
pub mod rpc {
    /// Request timeout (milliseconds)
    pub const TIMEOUT_MS: u64 = 30_000;

    /// Idle connections kept per host
    pub const POOL_MAX_IDLE_PER_HOST: usize = 10;

    /// TCP keepalive (seconds)
    pub const TCP_KEEPALIVE_SECS: u64 = 60;
}

pub const LOG_LEVEL: &str = "info";
