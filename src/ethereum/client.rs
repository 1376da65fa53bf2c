//! Ethereum RPC client.

use alloy::{
    eips::BlockNumberOrTag,
    network::Ethereum,
    primitives::{Address, Bytes, TxHash, U256},
    providers::{Provider, ProviderBuilder, RootProvider},
    rpc::types::{Block, TransactionReceipt, TransactionRequest},
};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::{
    error::{AppError, Result},
    ethereum::RpcBackend,
    types::{Network, TxOutcome},
};

/// Type alias for the HTTP provider.
pub type HttpProvider = RootProvider<Ethereum>;

/// Ethereum RPC client wrapper.
///
/// Transactions are sent with `eth_sendTransaction`, so the node signs them
/// with one of its own unlocked accounts.
#[derive(Clone)]
pub struct EthereumClient {
    /// The underlying provider.
    provider: Arc<HttpProvider>,
    /// Endpoint description for logging.
    endpoint: String,
}

impl EthereumClient {
    /// Create a new Ethereum client over HTTP.
    ///
    /// Note: This does NOT make any network calls. An unreachable endpoint
    /// only surfaces on the first request.
    pub fn new(rpc_url: &str) -> Result<Self> {
        let url = rpc_url
            .parse()
            .map_err(|_| AppError::Config(format!("Invalid RPC URL: {}", rpc_url)))?;

        #[allow(deprecated)]
        let provider = ProviderBuilder::new().connect_http(url).root().clone();

        tracing::info!(rpc_url = %rpc_url, "Ethereum client created");

        Ok(Self { provider: Arc::new(provider), endpoint: rpc_url.to_string() })
    }

    /// Reuse the transport of an already configured provider.
    pub fn from_provider<P>(provider: &P) -> Self
    where
        P: Provider<Ethereum>,
    {
        tracing::info!("Ethereum client created from existing provider");

        Self { provider: Arc::new(provider.root().clone()), endpoint: "<existing provider>".into() }
    }

    /// Get the underlying provider.
    pub fn provider(&self) -> &HttpProvider {
        &self.provider
    }

    /// Endpoint this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RpcBackend for EthereumClient {
    async fn network(&self) -> Result<Network> {
        let chain_id = self.provider.get_chain_id().await?;
        Ok(Network::from_chain_id(chain_id))
    }

    async fn accounts(&self) -> Result<Vec<Address>> {
        let accounts = self.provider.get_accounts().await?;
        Ok(accounts)
    }

    async fn balance(&self, address: Address) -> Result<U256> {
        let balance = self.provider.get_balance(address).await?;
        Ok(balance)
    }

    async fn block(&self, number: BlockNumberOrTag) -> Result<Option<Block>> {
        let block = self.provider.get_block_by_number(number).await?;
        Ok(block)
    }

    async fn transaction_receipt(&self, hash: TxHash) -> Result<Option<TransactionReceipt>> {
        let receipt = self.provider.get_transaction_receipt(hash).await?;
        Ok(receipt)
    }

    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64> {
        let gas = self.provider.estimate_gas(tx.clone()).await?;
        Ok(gas)
    }

    async fn call(&self, tx: &TransactionRequest) -> Result<Bytes> {
        let result = self.provider.call(tx.clone()).await?;
        Ok(result)
    }

    async fn submit(&self, tx: TransactionRequest) -> Result<TxOutcome> {
        let pending = self.provider.send_transaction(tx).await?;
        let hash = *pending.tx_hash();
        tracing::debug!(tx_hash = %hash, endpoint = %self.endpoint, "Transaction submitted");

        let receipt = pending.get_receipt().await?;

        Ok(TxOutcome {
            transaction_hash: receipt.transaction_hash,
            contract_address: receipt.contract_address,
            gas_used: receipt.gas_used,
            success: receipt.status(),
        })
    }

    async fn raw_request(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        let result = self.provider.raw_request::<_, Value>(method.to_string().into(), params).await?;
        Ok(result)
    }
}
