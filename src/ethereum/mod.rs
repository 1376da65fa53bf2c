//! Ethereum interaction module.
//!
//! Contains the RPC backend seam and the alloy-backed client implementing it.

pub mod backend;
pub mod client;
pub mod constants;

pub use backend::RpcBackend;
pub use client::{EthereumClient, HttpProvider};
