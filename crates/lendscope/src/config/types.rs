use serde::Deserialize;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Top-level aggregate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct LensConfig {
    pub app: AppConfig,
    pub chain: ChainConfig,
}

// ---------------------------------------------------------------------------
// app.json
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub precision: PrecisionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrecisionConfig {
    /// Fractional digits carried by the [`DecimalContext`](crate::DecimalContext).
    pub decimal_precision: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
}

// ---------------------------------------------------------------------------
// chains/<id>.json
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    pub chain_id: u64,
    pub chain_name: String,
    pub rpc: RpcConfig,
    pub contracts: ContractsConfig,
    pub tokens: HashMap<String, TokenConfig>,
    pub multicall: MulticallConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcConfig {
    pub http_url: String,
    #[serde(default)]
    pub http_url_fallback: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractsConfig {
    pub multicall3: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    pub address: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MulticallConfig {
    /// Sub-calls packed into one aggregate call.
    pub batch_size: usize,
}
