//! Compile-time ABI definitions via Alloy `sol!`.

use alloy::sol;

sol! {
    /// Multicall3 — same deterministic deployment on every major EVM chain.
    ///
    /// Only the read-side surface is declared; value-bearing variants are
    /// out of scope for a read-only aggregator.
    #[sol(rpc)]
    interface IMulticall3 {
        #[derive(Debug)]
        struct Call3 {
            address target;
            bool allowFailure;
            bytes callData;
        }

        struct Result {
            bool success;
            bytes returnData;
        }

        function aggregate3(Call3[] calldata calls) external payable returns (Result[] memory returnData);

        function getBlockNumber() external view returns (uint256 blockNumber);

        function getEthBalance(address addr) external view returns (uint256 balance);
    }
}
