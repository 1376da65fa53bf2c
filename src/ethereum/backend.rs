//! The RPC seam everything else talks through.

use alloy::{
    eips::BlockNumberOrTag,
    primitives::{Address, Bytes, TxHash, U256},
    rpc::types::{Block, TransactionReceipt, TransactionRequest},
};
use async_trait::async_trait;
use serde_json::Value;

use crate::{
    error::Result,
    types::{Network, TxOutcome},
};

/// Node operations the tracker, façade and services rely on.
///
/// `EthereumClient` implements this over an alloy provider; tests swap in a
/// scripted implementation.
#[async_trait]
pub trait RpcBackend: Send + Sync {
    /// The network the node is on.
    async fn network(&self) -> Result<Network>;

    /// Accounts the node can sign for (`eth_accounts`).
    async fn accounts(&self) -> Result<Vec<Address>>;

    /// Native balance of an address, in wei.
    async fn balance(&self, address: Address) -> Result<U256>;

    /// A block by number or tag.
    async fn block(&self, number: BlockNumberOrTag) -> Result<Option<Block>>;

    /// Receipt of a transaction, if mined.
    async fn transaction_receipt(&self, hash: TxHash) -> Result<Option<TransactionReceipt>>;

    /// Gas estimate for a transaction.
    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64>;

    /// Execute a call without broadcasting.
    async fn call(&self, tx: &TransactionRequest) -> Result<Bytes>;

    /// Broadcast a transaction through the node and wait for its receipt.
    async fn submit(&self, tx: TransactionRequest) -> Result<TxOutcome>;

    /// Forward a raw JSON-RPC request.
    async fn raw_request(&self, method: &str, params: Vec<Value>) -> Result<Value>;
}
