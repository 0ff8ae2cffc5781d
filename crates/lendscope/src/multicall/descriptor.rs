use alloy::dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy::json_abi::Function;
use alloy::primitives::{Address, Bytes};

use crate::errors::LensError;

/// One read call against one contract.
///
/// The function is described by a human-readable signature carrying both
/// input and output types, e.g.
/// `"getReserveData(address)(uint256,uint256,uint256)"`; arguments are
/// dynamic [`DynSolValue`]s so heterogeneous calls can share one batch.
///
/// [`Address::ZERO`] is the designated skip sentinel: a descriptor targeting
/// it is never sent to the network, and its result slot stays `None` so the
/// batch result still lines up 1:1 with the input list. Registries use this
/// for "contract not deployed on this chain" entries.
#[derive(Debug, Clone)]
pub struct CallDescriptor {
    pub target: Address,
    pub function: Function,
    pub args: Vec<DynSolValue>,
    /// Optional gas allowance for this sub-call; summed per aggregate call.
    pub gas_limit: Option<u64>,
}

impl CallDescriptor {
    pub fn new(
        target: Address,
        signature: &str,
        args: Vec<DynSolValue>,
    ) -> Result<Self, LensError> {
        let function = Function::parse(signature).map_err(|e| LensError::Signature {
            signature: signature.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            target,
            function,
            args,
            gas_limit: None,
        })
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    /// Whether this descriptor is the null-target skip sentinel.
    pub fn is_skipped(&self) -> bool {
        self.target.is_zero()
    }

    /// Selector-prefixed calldata for the wire.
    pub fn encode_input(&self) -> Result<Bytes, alloy::dyn_abi::Error> {
        self.function.abi_encode_input(&self.args).map(Bytes::from)
    }

    /// Decode raw return bytes into one value per declared output.
    pub fn decode_output(&self, data: &[u8]) -> Result<Vec<DynSolValue>, alloy::dyn_abi::Error> {
        self.function.abi_decode_output(data)
    }
}
