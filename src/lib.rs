//! eth-tx
//!
//! Connection tracking and contract helpers on top of an Ethereum JSON-RPC
//! client.
//!
//! # Features
//!
//! - **Connection tracking**: connect to a node, keep its network and accounts
//!   current, and get called back when either changes
//! - **Contract façade**: deploy or attach to a contract from its ABI and
//!   bytecode, then call its methods by name
//! - **Transactions**: gas estimation with a safety margin and ceiling, raw RPC,
//!   and dev-chain time travel
//!
//! # Example
//!
//! ```rust,ignore
//! use eth_tx::{ConnectionTracker, ContractFacade, TxOptions};
//!
//! #[tokio::main]
//! async fn main() -> eth_tx::Result<()> {
//!     let tracker = ConnectionTracker::new();
//!     let accounts = tracker.connect("http://localhost:8545").await?;
//!
//!     tracker.on_status_changed(|status| println!("{status:?}"))?;
//!
//!     let store = ContractFacade::from_json(tracker.clone(), ABI, BYTECODE)?;
//!     let instance = store.deploy(&[], TxOptions::default()).await?;
//!     println!("deployed at {}", instance.address());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod connection;
pub mod contract;
pub mod error;
pub mod ethereum;
pub mod services;
pub mod types;

pub use config::Config;
pub use connection::{ConnectionStatus, ConnectionTracker, ObserverId};
pub use contract::{ContractFacade, ContractHandle, ContractMethod, MethodOutput};
pub use error::{AppError, Result};
pub use ethereum::{EthereumClient, RpcBackend};
pub use services::{GasPolicy, TransactionService};
pub use types::{Network, TxOptions, TxOutcome};
