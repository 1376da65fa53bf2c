//! Common utilities for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use alloy::{
    eips::BlockNumberOrTag,
    primitives::{address, Address, Bytes, TxHash, TxKind, B256, U256},
    rpc::types::{Block, TransactionReceipt, TransactionRequest},
};
use async_trait::async_trait;
use serde_json::Value;

use eth_tx::{AppError, ConnectionTracker, Network, Result, RpcBackend, TxOutcome};

pub const ALICE: Address = address!("00000000000000000000000000000000000000a1");
pub const BOB: Address = address!("00000000000000000000000000000000000000b0");
pub const CONTRACT: Address = address!("03f3fE224F6c4eB3437b273fB682326034A69EfD");

/// Ropsten, the network the hash store demo expects.
pub const ROPSTEN: u64 = 3;

/// A minimal hash store contract ABI.
pub const HASH_STORE_ABI: &str = r#"[
    {"type":"constructor","inputs":[{"name":"initialHash","type":"bytes"}],"stateMutability":"nonpayable"},
    {"type":"function","name":"getHash","inputs":[],"outputs":[{"name":"","type":"bytes"}],"stateMutability":"view"},
    {"type":"function","name":"setHash","inputs":[{"name":"hash","type":"bytes"}],"outputs":[],"stateMutability":"nonpayable"}
]"#;

/// Placeholder creation code; the mock never executes it.
pub const HASH_STORE_BYTECODE: &str = "0x6080604052";

/// Scripted node state and a record of everything asked of it.
#[derive(Debug, Default)]
pub struct MockState {
    pub chain_id: u64,
    pub accounts: Vec<Address>,
    pub balance: U256,
    pub gas_estimate: u64,
    pub call_output: Bytes,
    pub deployed_address: Option<Address>,
    pub revert: bool,
    pub fail_network: bool,
    pub fail_accounts: bool,
    pub network_calls: usize,
    pub estimated: Vec<TransactionRequest>,
    pub submitted: Vec<TransactionRequest>,
    pub calls: Vec<TransactionRequest>,
    pub raw: Vec<(String, Vec<Value>)>,
}

/// In-memory stand-in for a node.
#[derive(Debug, Default)]
pub struct MockBackend {
    state: Mutex<MockState>,
}

impl MockBackend {
    pub fn new(chain_id: u64, accounts: Vec<Address>) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(MockState {
                chain_id,
                accounts,
                gas_estimate: 21_000,
                deployed_address: Some(CONTRACT),
                ..MockState::default()
            }),
        })
    }

    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    pub fn set_accounts(&self, accounts: Vec<Address>) {
        self.state().accounts = accounts;
    }

    pub fn set_chain_id(&self, chain_id: u64) {
        self.state().chain_id = chain_id;
    }
}

#[async_trait]
impl RpcBackend for MockBackend {
    async fn network(&self) -> Result<Network> {
        let mut state = self.state();
        state.network_calls += 1;
        if state.fail_network {
            return Err(AppError::Transport("connection refused".into()));
        }
        Ok(Network::from_chain_id(state.chain_id))
    }

    async fn accounts(&self) -> Result<Vec<Address>> {
        let state = self.state();
        if state.fail_accounts {
            return Err(AppError::Transport("connection reset".into()));
        }
        Ok(state.accounts.clone())
    }

    async fn balance(&self, _address: Address) -> Result<U256> {
        Ok(self.state().balance)
    }

    async fn block(&self, _number: BlockNumberOrTag) -> Result<Option<Block>> {
        Ok(None)
    }

    async fn transaction_receipt(&self, _hash: TxHash) -> Result<Option<TransactionReceipt>> {
        Ok(None)
    }

    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64> {
        let mut state = self.state();
        state.estimated.push(tx.clone());
        Ok(state.gas_estimate)
    }

    async fn call(&self, tx: &TransactionRequest) -> Result<Bytes> {
        let mut state = self.state();
        state.calls.push(tx.clone());
        Ok(state.call_output.clone())
    }

    async fn submit(&self, tx: TransactionRequest) -> Result<TxOutcome> {
        let mut state = self.state();
        let is_create = tx.to == Some(TxKind::Create);
        let gas_used = tx.gas.unwrap_or_default();
        state.submitted.push(tx);

        Ok(TxOutcome {
            transaction_hash: B256::repeat_byte(state.submitted.len() as u8),
            contract_address: if is_create { state.deployed_address } else { None },
            gas_used,
            success: !state.revert,
        })
    }

    async fn raw_request(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        self.state().raw.push((method.to_string(), params));
        Ok(Value::Bool(true))
    }
}

/// A tracker already connected to `backend`.
pub async fn connected_tracker(backend: &Arc<MockBackend>) -> ConnectionTracker {
    let tracker = ConnectionTracker::new();
    tracker.use_backend(backend.clone() as Arc<dyn RpcBackend>).await.unwrap();
    tracker
}

/// Helper to connect to the node named by `ETHEREUM_RPC_URL`.
pub async fn live_tracker() -> Option<ConnectionTracker> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let rpc_url = std::env::var("ETHEREUM_RPC_URL").ok()?;
    if rpc_url.is_empty() {
        return None;
    }

    let tracker = ConnectionTracker::new();
    tracker.connect(&rpc_url).await.ok()?;
    Some(tracker)
}

/// Skip test if no node is reachable (missing env var or node down).
#[macro_export]
macro_rules! skip_if_no_node {
    () => {
        match common::live_tracker().await {
            Some(tracker) => tracker,
            None => {
                eprintln!("Skipping test: ETHEREUM_RPC_URL not set or node unreachable");
                return;
            }
        }
    };
}
