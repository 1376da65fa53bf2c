//! Deployed or attached contract instances and their ABI-driven methods.

use alloy::{
    dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt},
    json_abi::{Function, JsonAbi, StateMutability},
    primitives::{Address, Bytes},
    rpc::types::TransactionRequest,
};
use std::sync::Arc;

use crate::{
    error::{AppError, Result},
    services::TransactionService,
    types::{TxOptions, TxOutcome},
};

/// A contract at a known address.
#[derive(Clone, Debug)]
pub struct ContractHandle {
    address: Address,
    abi: Arc<JsonAbi>,
    bytecode: Bytes,
    transactions: TransactionService,
}

/// What running a method produced.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodOutput {
    /// Decoded return values of a read-only call.
    Values(Vec<DynSolValue>),
    /// Receipt summary of a state-changing transaction.
    Transaction(TxOutcome),
}

impl ContractHandle {
    pub(crate) fn new(
        address: Address,
        abi: Arc<JsonAbi>,
        bytecode: Bytes,
        transactions: TransactionService,
    ) -> Self {
        Self { address, abi, bytecode, transactions }
    }

    /// Address of the instance.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The contract ABI.
    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    /// The creation bytecode this handle was built from.
    pub fn bytecode(&self) -> &Bytes {
        &self.bytecode
    }

    /// Names of the ABI functions, sorted, overloads listed once.
    pub fn method_names(&self) -> Vec<&str> {
        self.abi.functions.keys().map(String::as_str).collect()
    }

    /// Look up a method by name.
    pub fn method<'a>(&'a self, name: &'a str) -> Result<ContractMethod<'a>> {
        let overloads = self
            .abi
            .function(name)
            .filter(|overloads| !overloads.is_empty())
            .ok_or_else(|| AppError::UnknownMethod(name.to_string()))?;
        Ok(ContractMethod { handle: self, name, overloads })
    }

    /// Shorthand for `method(name)?.call(args)`.
    pub async fn call(&self, name: &str, args: &[DynSolValue]) -> Result<Vec<DynSolValue>> {
        self.method(name)?.call(args).await
    }

    /// Shorthand for `method(name)?.send(args, opts)`.
    pub async fn send(&self, name: &str, args: &[DynSolValue], opts: TxOptions) -> Result<TxOutcome> {
        self.method(name)?.send(args, opts).await
    }

    /// Shorthand for `method(name)?.invoke(args, opts)`.
    pub async fn invoke(
        &self,
        name: &str,
        args: &[DynSolValue],
        opts: TxOptions,
    ) -> Result<MethodOutput> {
        self.method(name)?.invoke(args, opts).await
    }
}

/// One named method of a contract, possibly overloaded.
#[derive(Debug, Clone, Copy)]
pub struct ContractMethod<'a> {
    handle: &'a ContractHandle,
    name: &'a str,
    overloads: &'a [Function],
}

impl<'a> ContractMethod<'a> {
    /// Method name.
    pub fn name(&self) -> &str {
        self.name
    }

    /// Whether every overload only reads state (`view` or `pure`).
    pub fn is_read_only(&self) -> bool {
        self.overloads.iter().all(reads_only)
    }

    /// Pick the overload taking `arg_count` arguments.
    pub fn resolve(&self, arg_count: usize) -> Result<&'a Function> {
        self.overloads.iter().find(|function| function.inputs.len() == arg_count).ok_or_else(|| {
            AppError::Abi(format!("No overload of {} takes {} arguments", self.name, arg_count))
        })
    }

    /// Run the method with `eth_call` and decode its outputs.
    pub async fn call(&self, args: &[DynSolValue]) -> Result<Vec<DynSolValue>> {
        let function = self.resolve(args.len())?;
        let backend = self.handle.transactions.tracker().backend().await?;

        let calldata = function.abi_encode_input(args)?;
        let mut tx = TransactionRequest::default().to(self.handle.address).input(Bytes::from(calldata).into());
        if let Some(sender) = self.handle.transactions.tracker().current_accounts().first() {
            tx = tx.from(*sender);
        }

        tracing::debug!(method = %function.signature(), address = %self.handle.address, "Calling contract");

        let output = backend.call(&tx).await?;
        let values = function.abi_decode_output(&output)?;
        Ok(values)
    }

    /// Send the method as a transaction and wait for it to be mined.
    pub async fn send(&self, args: &[DynSolValue], opts: TxOptions) -> Result<TxOutcome> {
        let function = self.resolve(args.len())?;
        if !self.handle.transactions.tracker().is_connected() {
            return Err(AppError::NotConnected);
        }

        let calldata = function.abi_encode_input(args)?;
        let tx = opts.apply(
            TransactionRequest::default().to(self.handle.address).input(Bytes::from(calldata).into()),
        );

        tracing::info!(method = %function.signature(), address = %self.handle.address, "Sending contract transaction");

        self.handle.transactions.send_transaction(tx).await
    }

    /// Call the overload matching `args` if it is read-only, send it otherwise.
    pub async fn invoke(&self, args: &[DynSolValue], opts: TxOptions) -> Result<MethodOutput> {
        if reads_only(self.resolve(args.len())?) {
            self.call(args).await.map(MethodOutput::Values)
        } else {
            self.send(args, opts).await.map(MethodOutput::Transaction)
        }
    }
}

fn reads_only(function: &Function) -> bool {
    matches!(function.state_mutability, StateMutability::View | StateMutability::Pure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{connection::ConnectionTracker, services::GasPolicy};

    const ABI: &str = r#"[
        {"type":"function","name":"getHash","inputs":[],"outputs":[{"name":"","type":"bytes"}],"stateMutability":"view"},
        {"type":"function","name":"setHash","inputs":[{"name":"hash","type":"bytes"}],"outputs":[],"stateMutability":"nonpayable"},
        {"type":"function","name":"store","inputs":[{"name":"a","type":"uint256"}],"outputs":[],"stateMutability":"nonpayable"},
        {"type":"function","name":"store","inputs":[{"name":"a","type":"uint256"},{"name":"b","type":"uint256"}],"outputs":[],"stateMutability":"nonpayable"}
    ]"#;

    const MIXED_ABI: &str = r#"[
        {"type":"function","name":"get","inputs":[{"name":"slot","type":"uint256"}],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
        {"type":"function","name":"get","inputs":[],"outputs":[],"stateMutability":"nonpayable"}
    ]"#;

    fn handle() -> ContractHandle {
        let abi: JsonAbi = serde_json::from_str(ABI).unwrap();
        ContractHandle::new(
            Address::repeat_byte(0xaa),
            Arc::new(abi),
            Bytes::new(),
            TransactionService::new(ConnectionTracker::new(), GasPolicy::default()),
        )
    }

    #[test]
    fn test_method_names() {
        assert_eq!(handle().method_names(), vec!["getHash", "setHash", "store"]);
    }

    #[test]
    fn test_unknown_method() {
        let handle = handle();
        let result = handle.method("missing");
        assert!(matches!(result, Err(AppError::UnknownMethod(name)) if name == "missing"));
    }

    #[test]
    fn test_read_only_detection() {
        let handle = handle();
        assert!(handle.method("getHash").unwrap().is_read_only());
        assert!(!handle.method("setHash").unwrap().is_read_only());
    }

    #[test]
    fn test_mixed_overloads_not_read_only() {
        let abi: JsonAbi = serde_json::from_str(MIXED_ABI).unwrap();
        let handle = ContractHandle::new(
            Address::repeat_byte(0xbb),
            Arc::new(abi),
            Bytes::new(),
            TransactionService::new(ConnectionTracker::new(), GasPolicy::default()),
        );
        let get = handle.method("get").unwrap();

        assert!(!get.is_read_only());
        assert!(reads_only(get.resolve(1).unwrap()));
        assert!(!reads_only(get.resolve(0).unwrap()));
    }

    #[tokio::test]
    async fn test_invoke_unknown_arity_before_any_rpc() {
        let result = handle().invoke("store", &[], TxOptions::default()).await;
        assert!(matches!(result, Err(AppError::Abi(_))));
    }

    #[test]
    fn test_overload_resolution_by_arg_count() {
        let handle = handle();
        let store = handle.method("store").unwrap();
        assert_eq!(store.resolve(1).unwrap().inputs.len(), 1);
        assert_eq!(store.resolve(2).unwrap().inputs.len(), 2);
        assert!(matches!(store.resolve(3), Err(AppError::Abi(_))));
    }

    #[tokio::test]
    async fn test_call_before_connect() {
        let result = handle().call("getHash", &[]).await;
        assert!(matches!(result, Err(AppError::NotConnected)));
    }

    #[tokio::test]
    async fn test_send_before_connect() {
        let args = [DynSolValue::Bytes(vec![0x12, 0x34])];
        let result = handle().send("setHash", &args, TxOptions::default()).await;
        assert!(matches!(result, Err(AppError::NotConnected)));
    }
}
