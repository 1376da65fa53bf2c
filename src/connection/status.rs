//! Connection status and change detection.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::types::Network;

/// What the tracker currently knows about the node connection.
///
/// `network` and `accounts` only mean something while `connected` is true.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    /// Whether a node answered the last connection attempt.
    pub connected: bool,
    /// Network the node reported.
    pub network: Option<Network>,
    /// Accounts the node exposes, in node order.
    pub accounts: Vec<Address>,
}

/// Which parts of the status differ between two observations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusChange {
    pub connected: bool,
    pub network: bool,
    pub accounts: bool,
}

impl StatusChange {
    /// Compare a previous snapshot against the current status.
    ///
    /// Accounts compare by membership and order.
    pub fn between(previous: &ConnectionStatus, current: &ConnectionStatus) -> Self {
        Self {
            connected: previous.connected != current.connected,
            network: previous.network != current.network,
            accounts: previous.accounts != current.accounts,
        }
    }

    /// Whether anything changed.
    pub fn any(&self) -> bool {
        self.connected || self.network || self.accounts
    }
}
