pub mod types;
pub mod validate;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

use crate::errors::LensError;
use crate::math::context::DecimalContext;

/// Load and merge the config JSON files for one chain into a [`LensConfig`],
/// then apply environment variable overrides and validate.
///
/// Expected directory layout:
/// ```text
/// config/
///   app.json
///   chains/1.json
///   chains/56.json
///   ...
/// ```
///
/// # Environment variable overrides
///
/// | Env Var                 | Config Field                     |
/// |-------------------------|----------------------------------|
/// | `RPC_URL_HTTP`          | `chain.rpc.http_url`             |
/// | `RPC_URL_HTTP_FALLBACK` | `chain.rpc.http_url_fallback`    |
/// | `MULTICALL3_ADDRESS`    | `chain.contracts.multicall3`     |
/// | `DECIMAL_PRECISION`     | `app.precision.decimal_precision`|
/// | `MULTICALL_BATCH_SIZE`  | `chain.multicall.batch_size`     |
pub fn load_config(config_dir: &Path, chain_id: u64) -> Result<LensConfig> {
    let read = |name: &str| -> Result<String> {
        let path = config_dir.join(name);
        std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file: {}", path.display()))
    };

    let app: AppConfig = serde_json::from_str(&read("app.json")?).context("parsing app.json")?;

    let chain_file = format!("chains/{chain_id}.json");
    let chain: ChainConfig = serde_json::from_str(&read(&chain_file)?)
        .with_context(|| format!("parsing {chain_file}"))?;

    let mut config = LensConfig { app, chain };

    apply_env_overrides(&mut config);
    validate::validate_config(&config)?;

    Ok(config)
}

impl LensConfig {
    /// Build the decimal context every math call in this process should use.
    pub fn decimal_context(&self) -> Result<DecimalContext, LensError> {
        DecimalContext::new(self.app.precision.decimal_precision)
    }
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides to the loaded config.
///
/// Only non-empty env vars take effect. Parse failures are skipped and the
/// JSON value remains.
fn apply_env_overrides(config: &mut LensConfig) {
    if let Some(val) = env_string("RPC_URL_HTTP") {
        info!("env override: RPC_URL_HTTP");
        config.chain.rpc.http_url = val;
    }

    if let Some(val) = env_string("RPC_URL_HTTP_FALLBACK") {
        info!("env override: RPC_URL_HTTP_FALLBACK");
        config.chain.rpc.http_url_fallback = val;
    }

    if let Some(val) = env_string("MULTICALL3_ADDRESS") {
        info!("env override: MULTICALL3_ADDRESS");
        config.chain.contracts.multicall3 = val;
    }

    if let Some(val) = env_parse::<u32>("DECIMAL_PRECISION") {
        info!(val, "env override: DECIMAL_PRECISION");
        config.app.precision.decimal_precision = val;
    }

    if let Some(val) = env_parse::<usize>("MULTICALL_BATCH_SIZE") {
        info!(val, "env override: MULTICALL_BATCH_SIZE");
        config.chain.multicall.batch_size = val;
    }
}

/// Read a non-empty env var as a `String`.
fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Read a non-empty env var and parse it as `T`.
fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env_string(key).and_then(|v| v.parse().ok())
}
