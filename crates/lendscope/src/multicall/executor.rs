use alloy::eips::{BlockId, BlockNumberOrTag};
use alloy::primitives::Address;
use alloy::providers::{Provider, RootProvider};
use futures::future::try_join_all;
use tracing::{debug, warn};

use crate::errors::LensError;

use super::contracts::IMulticall3::{self, Call3};
use super::descriptor::CallDescriptor;
use super::{BatchResult, DecodedCall};

/// Concrete provider type: Alloy HTTP provider over Ethereum network.
pub type HttpProvider = RootProvider;

/// The wire-ready subset of a descriptor list.
///
/// Skip-sentinel descriptors are dropped here; `indices` remembers where
/// each wire call came from so [`reassemble`] can restore 1:1 alignment
/// with the caller's list afterwards.
#[derive(Debug)]
struct BatchPlan {
    indices: Vec<usize>,
    calls: Vec<Call3>,
    gas_limits: Vec<Option<u64>>,
}

/// Executes heterogeneous read calls as one Multicall3 `aggregate3` round
/// trip per chunk, every chunk pinned to the same block height.
///
/// Failure semantics: a reverting or undecodable sub-call surfaces as `None`
/// in its slot; only transport-level failure (endpoint unreachable, the
/// aggregate call itself reverting, a result-count mismatch) aborts the
/// batch. No retries happen here — that is the transport layer's job.
pub struct BatchExecutor {
    multicall: IMulticall3::IMulticall3Instance<HttpProvider>,
    batch_size: usize,
}

impl BatchExecutor {
    pub fn new(provider: HttpProvider, multicall_address: Address, batch_size: usize) -> Self {
        Self {
            multicall: IMulticall3::new(multicall_address, provider),
            batch_size: batch_size.max(1),
        }
    }

    /// Execute `calls` against `block`, returning one slot per descriptor in
    /// submission order.
    ///
    /// `BlockId::latest()` (or any other tag) is resolved to a concrete
    /// number before the first chunk goes out, so every sub-call — across
    /// chunks too — observes one consistent chain state. Price and
    /// collateral factor read in the same batch are guaranteed to describe
    /// the same block.
    pub async fn execute(
        &self,
        calls: &[CallDescriptor],
        block: BlockId,
    ) -> Result<BatchResult, LensError> {
        if calls.is_empty() {
            return Ok(Vec::new());
        }

        let plan = plan_batch(calls)?;
        if plan.calls.is_empty() {
            return Ok(vec![None; calls.len()]);
        }

        let pinned = self.pin_block(block).await?;
        debug!(
            block = pinned,
            total = calls.len(),
            wire = plan.calls.len(),
            "executing batch"
        );

        // Chunks share a pinned height, so they can go out concurrently.
        let mut chunk_futures = Vec::new();
        for (chunk, chunk_gas) in plan
            .calls
            .chunks(self.batch_size)
            .zip(plan.gas_limits.chunks(self.batch_size))
        {
            let requested: u64 = chunk_gas.iter().flatten().sum();
            let mut builder = self
                .multicall
                .aggregate3(chunk.to_vec())
                .block(BlockId::number(pinned));
            if requested > 0 {
                builder = builder.gas(requested);
            }
            chunk_futures.push(async move { builder.call().await });
        }

        let returns: Vec<IMulticall3::Result> = try_join_all(chunk_futures)
            .await?
            .into_iter()
            .flatten()
            .collect();

        if returns.len() != plan.calls.len() {
            return Err(LensError::ResultCountMismatch {
                expected: plan.calls.len(),
                got: returns.len(),
            });
        }

        let decoded = plan
            .indices
            .iter()
            .zip(&returns)
            .map(|(&index, ret)| decode_slot(&calls[index], index, ret))
            .collect();

        Ok(reassemble(calls.len(), &plan.indices, decoded))
    }

    /// Resolve a block tag to a concrete height; pass numbers through.
    async fn pin_block(&self, block: BlockId) -> Result<u64, LensError> {
        match block {
            BlockId::Number(BlockNumberOrTag::Number(number)) => Ok(number),
            _ => Ok(self.multicall.provider().get_block_number().await?),
        }
    }
}

/// Encode the non-skipped descriptors. An un-encodable descriptor is a
/// caller bug and fails the whole batch, unlike runtime sub-call failures.
fn plan_batch(calls: &[CallDescriptor]) -> Result<BatchPlan, LensError> {
    let mut plan = BatchPlan {
        indices: Vec::with_capacity(calls.len()),
        calls: Vec::with_capacity(calls.len()),
        gas_limits: Vec::with_capacity(calls.len()),
    };
    for (index, descriptor) in calls.iter().enumerate() {
        if descriptor.is_skipped() {
            debug!(index, function = %descriptor.function.name, "skipping null-target call");
            continue;
        }
        let call_data = descriptor.encode_input().map_err(|e| LensError::Encode {
            index,
            reason: e.to_string(),
        })?;
        plan.indices.push(index);
        plan.calls.push(Call3 {
            target: descriptor.target,
            allowFailure: true,
            callData: call_data,
        });
        plan.gas_limits.push(descriptor.gas_limit);
    }
    Ok(plan)
}

/// Decode one wire result. Reverts, empty return data, and undecodable
/// bytes all degrade to `None` — the batch itself stays healthy.
fn decode_slot(
    descriptor: &CallDescriptor,
    index: usize,
    ret: &IMulticall3::Result,
) -> Option<DecodedCall> {
    if !ret.success {
        debug!(index, function = %descriptor.function.name, "sub-call reverted");
        return None;
    }
    if ret.returnData.is_empty() {
        debug!(index, function = %descriptor.function.name, "sub-call returned no data");
        return None;
    }
    match descriptor.decode_output(&ret.returnData) {
        Ok(values) => Some(values),
        Err(e) => {
            warn!(
                index,
                function = %descriptor.function.name,
                error = %e,
                "failed to decode sub-call return data"
            );
            None
        }
    }
}

/// Re-insert `None` at the positions of skipped calls so the output aligns
/// 1:1 with the caller's original list.
fn reassemble(total: usize, indices: &[usize], decoded: Vec<Option<DecodedCall>>) -> BatchResult {
    let mut slots: BatchResult = vec![None; total];
    for (&index, value) in indices.iter().zip(decoded) {
        slots[index] = value;
    }
    slots
}
