//! Transaction submission and thin query wrappers.

use alloy::{
    eips::BlockNumberOrTag,
    primitives::{Address, TxHash, U256},
    rpc::types::{Block, TransactionReceipt, TransactionRequest},
};
use serde_json::{json, Value};

use crate::{
    connection::ConnectionTracker,
    error::{AppError, Result},
    services::GasPolicy,
    types::TxOutcome,
};

/// Service for sending transactions through the tracked connection.
#[derive(Clone, Debug)]
pub struct TransactionService {
    tracker: ConnectionTracker,
    gas: GasPolicy,
}

impl TransactionService {
    /// Create a new transaction service.
    pub fn new(tracker: ConnectionTracker, gas: GasPolicy) -> Self {
        Self { tracker, gas }
    }

    /// The tracker this service sends through.
    pub fn tracker(&self) -> &ConnectionTracker {
        &self.tracker
    }

    /// The gas policy applied before submission.
    pub fn gas_policy(&self) -> GasPolicy {
        self.gas
    }

    /// Send a transaction and wait for it to be mined.
    ///
    /// `from` defaults to the first known account. The gas limit is the
    /// node's estimate plus the policy margin; nothing is submitted when the
    /// estimate is above the policy ceiling.
    pub async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxOutcome> {
        let backend = self.tracker.backend().await?;
        let tx = self.with_default_sender(tx)?;

        let estimate = backend.estimate_gas(&tx).await?;
        let gas_limit = self.gas.gas_limit(estimate).map_err(|err| {
            tracing::warn!(estimate = estimate, ceiling = self.gas.ceiling, "Gas estimate over ceiling");
            err
        })?;

        tracing::info!(
            from = ?tx.from,
            to = ?tx.to,
            gas_limit = gas_limit,
            "Sending transaction"
        );

        let outcome = backend.submit(tx.gas_limit(gas_limit)).await?;

        if !outcome.success {
            tracing::warn!(tx_hash = %outcome.transaction_hash, "Transaction reverted");
            return Err(AppError::TransactionFailed(outcome.transaction_hash));
        }

        tracing::info!(
            tx_hash = %outcome.transaction_hash,
            gas_used = outcome.gas_used,
            "Transaction mined"
        );

        Ok(outcome)
    }

    /// Estimate gas for a transaction as-is.
    pub async fn estimate_transaction_gas(&self, tx: &TransactionRequest) -> Result<u64> {
        let backend = self.tracker.backend().await?;
        backend.estimate_gas(tx).await
    }

    /// Native balance of an address, in wei.
    pub async fn get_balance(&self, address: Address) -> Result<U256> {
        tracing::debug!(address = %address, "Querying balance");
        let backend = self.tracker.backend().await?;
        backend.balance(address).await
    }

    /// A block by number or tag.
    pub async fn get_block(&self, number: BlockNumberOrTag) -> Result<Option<Block>> {
        let backend = self.tracker.backend().await?;
        backend.block(number).await
    }

    /// Receipt of a transaction, if mined.
    pub async fn get_transaction_receipt(&self, hash: TxHash) -> Result<Option<TransactionReceipt>> {
        let backend = self.tracker.backend().await?;
        backend.transaction_receipt(hash).await
    }

    /// Send a raw JSON-RPC request.
    pub async fn rpc_send(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        if !self.tracker.is_connected() {
            return Err(AppError::NotConnected);
        }
        if method.trim().is_empty() {
            return Err(AppError::MissingMethod);
        }

        let backend = self.tracker.backend().await?;
        tracing::debug!(method = %method, "Raw RPC request");
        backend.raw_request(method, params).await
    }

    /// Mine a block, advance the chain clock by `seconds`, then mine again.
    ///
    /// Only development nodes (Ganache, Anvil, Hardhat) understand these calls.
    pub async fn delay(&self, seconds: u64) -> Result<()> {
        self.rpc_send("evm_mine", Vec::new()).await?;
        self.rpc_send("evm_increaseTime", vec![json!(seconds)]).await?;
        self.rpc_send("evm_mine", Vec::new()).await?;
        Ok(())
    }

    /// Fill in `from` with the first known account if unset.
    pub(crate) fn with_default_sender(&self, tx: TransactionRequest) -> Result<TransactionRequest> {
        if tx.from.is_some() {
            return Ok(tx);
        }
        let sender = self.tracker.current_accounts().first().copied().ok_or(AppError::NoAccounts)?;
        Ok(tx.from(sender))
    }
}
