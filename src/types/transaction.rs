//! Transaction-related types.

use alloy::{
    primitives::{Address, TxHash, U256},
    rpc::types::TransactionRequest,
};
use serde::{Deserialize, Serialize};

/// Per-transaction overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOptions {
    /// Sender. Defaults to the first account the node exposes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    /// Wei sent along with the transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    /// Legacy gas price in wei.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<u128>,
}

impl TxOptions {
    /// Options sending `value` wei.
    pub fn with_value(value: U256) -> Self {
        Self { value: Some(value), ..Self::default() }
    }

    /// Copy the overrides into a transaction request, leaving unset fields alone.
    pub fn apply(&self, mut tx: TransactionRequest) -> TransactionRequest {
        if let Some(from) = self.from {
            tx = tx.from(from);
        }
        if let Some(value) = self.value {
            tx = tx.value(value);
        }
        if let Some(gas_price) = self.gas_price {
            tx = tx.gas_price(gas_price);
        }
        tx
    }
}

/// Summary of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutcome {
    /// Transaction hash.
    pub transaction_hash: TxHash,
    /// Address of the created contract, for deployments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<Address>,
    /// Gas consumed.
    pub gas_used: u64,
    /// Whether execution succeeded.
    pub success: bool,
}
