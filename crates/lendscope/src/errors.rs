use thiserror::Error;

/// Typed error hierarchy for lendscope.
///
/// Only hard failures surface here: transport errors, caller mistakes, and
/// configuration problems. Per-call decode failures inside a batch are *not*
/// errors — they degrade to `None` slots in the batch result.
#[derive(Error, Debug)]
pub enum LensError {
    // -- Batch execution ----------------------------------------------------
    #[error("aggregate call failed: {0}")]
    Transport(#[from] alloy::contract::Error),

    #[error("call #{index} could not be ABI-encoded: {reason}")]
    Encode { index: usize, reason: String },

    #[error("invalid function signature '{signature}': {reason}")]
    Signature { signature: String, reason: String },

    #[error("aggregate returned {got} results for {expected} calls")]
    ResultCountMismatch { expected: usize, got: usize },

    // -- Position aggregation -----------------------------------------------
    #[error("no market data for symbol '{symbol}'")]
    UnknownMarket { symbol: String },

    // -- Numeric configuration ----------------------------------------------
    #[error("decimal precision {precision} exceeds the supported maximum {max}")]
    Precision { precision: u32, max: u32 },

    // -- Forwarded errors ---------------------------------------------------
    #[error(transparent)]
    Rpc(#[from] alloy::transports::TransportError),
}
