//! Contract façade: an ABI plus bytecode that can be deployed or attached.

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt},
    json_abi::JsonAbi,
    network::TransactionBuilder,
    primitives::{Address, Bytes},
    rpc::types::TransactionRequest,
};
use std::sync::Arc;

use super::ContractHandle;
use crate::{
    connection::ConnectionTracker,
    error::{AppError, Result},
    services::{GasPolicy, TransactionService},
    types::TxOptions,
};

/// A contract definition bound to a connection.
#[derive(Clone, Debug)]
pub struct ContractFacade {
    abi: Arc<JsonAbi>,
    bytecode: Bytes,
    transactions: TransactionService,
}

impl ContractFacade {
    /// Wrap an ABI and creation bytecode, using the default gas policy.
    pub fn new(tracker: ConnectionTracker, abi: JsonAbi, bytecode: Bytes) -> Self {
        Self {
            abi: Arc::new(abi),
            bytecode,
            transactions: TransactionService::new(tracker, GasPolicy::default()),
        }
    }

    /// Wrap a JSON ABI and hex-encoded bytecode.
    pub fn from_json(tracker: ConnectionTracker, abi_json: &str, bytecode_hex: &str) -> Result<Self> {
        let abi: JsonAbi = serde_json::from_str(abi_json)?;
        let bytecode: Bytes = bytecode_hex
            .trim()
            .parse()
            .map_err(|e| AppError::Abi(format!("Invalid bytecode: {e}")))?;
        Ok(Self::new(tracker, abi, bytecode))
    }

    /// Replace the gas policy used for deployments and method transactions.
    pub fn with_gas_policy(mut self, gas: GasPolicy) -> Self {
        self.transactions = TransactionService::new(self.transactions.tracker().clone(), gas);
        self
    }

    /// The contract ABI.
    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    /// The creation bytecode.
    pub fn bytecode(&self) -> &Bytes {
        &self.bytecode
    }

    /// Deploy a new instance and wait for it to be mined.
    pub async fn deploy(&self, args: &[DynSolValue], opts: TxOptions) -> Result<ContractHandle> {
        if !self.transactions.tracker().is_connected() {
            return Err(AppError::NotConnected);
        }

        let code = self.deploy_code(args)?;
        let tx = opts.apply(TransactionRequest::default().with_deploy_code(code));

        tracing::info!(args = args.len(), "Deploying contract");

        let outcome = self.transactions.send_transaction(tx).await?;
        let address = outcome.contract_address.ok_or_else(|| {
            AppError::Rpc(format!(
                "Deployment receipt {} has no contract address",
                outcome.transaction_hash
            ))
        })?;

        tracing::info!(address = %address, tx_hash = %outcome.transaction_hash, "Contract deployed");

        Ok(self.handle(address))
    }

    /// Bind to an instance already at `address`.
    ///
    /// Nothing checks that a contract actually lives there.
    pub fn attach(&self, address: Address) -> Result<ContractHandle> {
        if !self.transactions.tracker().is_connected() {
            return Err(AppError::NotConnected);
        }
        tracing::debug!(address = %address, "Attaching to contract");
        Ok(self.handle(address))
    }

    /// Creation bytecode followed by the ABI-encoded constructor arguments.
    pub fn deploy_code(&self, args: &[DynSolValue]) -> Result<Bytes> {
        let encoded_args = match &self.abi.constructor {
            Some(constructor) => constructor.abi_encode_input(args)?,
            None if args.is_empty() => Vec::new(),
            None => {
                return Err(AppError::Abi(format!(
                    "Contract has no constructor but {} arguments were given",
                    args.len()
                )))
            }
        };

        let mut code = Vec::with_capacity(self.bytecode.len() + encoded_args.len());
        code.extend_from_slice(&self.bytecode);
        code.extend_from_slice(&encoded_args);
        Ok(code.into())
    }

    fn handle(&self, address: Address) -> ContractHandle {
        ContractHandle::new(address, self.abi.clone(), self.bytecode.clone(), self.transactions.clone())
    }
}
