use anyhow::{bail, Result};

use crate::math::context::MAX_PRECISION;

use super::types::LensConfig;

/// Fewest fractional digits that still keep per-second compounding honest
/// over tens of millions of periods.
const MIN_PRECISION: u32 = 6;

/// Validate invariants across the merged config that serde alone cannot
/// enforce. All violations are collected and reported together. Called
/// automatically by [`super::load_config`].
pub fn validate_config(config: &LensConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    validate_app_config(config, &mut errors);
    validate_chain_config(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        let msg = format!(
            "Configuration validation failed ({} error{}):\n  - {}",
            errors.len(),
            if errors.len() == 1 { "" } else { "s" },
            errors.join("\n  - ")
        );
        bail!("{msg}");
    }
}

// ---------------------------------------------------------------------------
// App config
// ---------------------------------------------------------------------------

fn validate_app_config(config: &LensConfig, errors: &mut Vec<String>) {
    let precision = config.app.precision.decimal_precision;
    if !(MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
        errors.push(format!(
            "app.precision: decimal_precision ({precision}) must be in [{MIN_PRECISION}, {MAX_PRECISION}]"
        ));
    }

    if config.app.logging.log_dir.is_empty() {
        errors.push("app.logging: log_dir is empty".into());
    }
}

// ---------------------------------------------------------------------------
// Chain config
// ---------------------------------------------------------------------------

fn validate_chain_config(config: &LensConfig, errors: &mut Vec<String>) {
    let chain = &config.chain;

    if chain.chain_id == 0 {
        errors.push("chain: chain_id must be non-zero".into());
    }

    if chain.rpc.http_url.is_empty() {
        errors.push("chain.rpc: http_url is empty".into());
    }

    if let Err(e) = validate_address(&chain.contracts.multicall3) {
        errors.push(format!("chain.contracts.multicall3: {e}"));
    }

    if chain.tokens.is_empty() {
        errors.push("chain.tokens: must have at least one token".into());
    }

    for (name, token) in &chain.tokens {
        if let Err(e) = validate_address(&token.address) {
            errors.push(format!("chain.tokens.{name}.address: {e}"));
        }
        if token.decimals > 30 {
            errors.push(format!(
                "chain.tokens.{name}: decimals ({}) exceeds 30",
                token.decimals
            ));
        }
    }

    if chain.multicall.batch_size == 0 {
        errors.push("chain.multicall: batch_size must be > 0".into());
    }
    if chain.multicall.batch_size > 1_000 {
        errors.push(format!(
            "chain.multicall: batch_size ({}) exceeds 1000 — a single aggregate call that large will not fit in block gas",
            chain.multicall.batch_size
        ));
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validate an Ethereum-style address string: 0x-prefixed, 42 chars of hex.
fn validate_address(addr: &str) -> Result<(), String> {
    if addr.is_empty() {
        return Err("address is empty".into());
    }
    if !addr.starts_with("0x") && !addr.starts_with("0X") {
        return Err(format!("address '{addr}' must start with 0x"));
    }
    if addr.len() != 42 {
        return Err(format!(
            "address '{addr}' has length {} (expected 42)",
            addr.len()
        ));
    }
    if !addr[2..].chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("address '{addr}' contains non-hex characters"));
    }
    Ok(())
}
