//! Batched read aggregation over Multicall3.
//!
//! Callers describe N independent read calls as [`CallDescriptor`]s; the
//! [`BatchExecutor`] packs them into one `aggregate3` round trip at a pinned
//! block height and hands back one result slot per descriptor, in submission
//! order. A reverting sub-call costs its own slot (`None`), never the batch.

pub mod contracts;
pub mod descriptor;
pub mod executor;

use alloy::dyn_abi::DynSolValue;

pub use descriptor::CallDescriptor;
pub use executor::{BatchExecutor, HttpProvider};

/// Decoded output of one sub-call: one tagged [`DynSolValue`] per return
/// parameter, in ABI order.
pub type DecodedCall = Vec<DynSolValue>;

/// One slot per input descriptor. `None` means the call was skipped
/// (null-target sentinel), reverted, returned no data, or could not be
/// decoded.
pub type BatchResult = Vec<Option<DecodedCall>>;
