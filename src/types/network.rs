//! Network identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ethereum::constants::network_name;

/// The network a node reports being on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Network {
    /// EIP-155 chain ID.
    pub chain_id: u64,
    /// Network type name ("main", "ropsten", ..., "private").
    pub name: String,
}

impl Network {
    /// Build a network from its chain ID, naming it after the known public chains.
    pub fn from_chain_id(chain_id: u64) -> Self {
        Self { chain_id, name: network_name(chain_id).to_string() }
    }

    /// Whether this network goes by the given name (case-insensitive).
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.chain_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_chain_id() {
        let network = Network::from_chain_id(3);
        assert_eq!(network.name, "ropsten");
        assert_eq!(network.chain_id, 3);
    }

    #[test]
    fn test_is_named_case_insensitive() {
        let network = Network::from_chain_id(1);
        assert!(network.is_named("MAIN"));
        assert!(!network.is_named("ropsten"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Network::from_chain_id(31337).to_string(), "private (31337)");
    }

    #[test]
    fn test_same_name_different_chain_not_equal() {
        assert_ne!(Network::from_chain_id(1337), Network::from_chain_id(31337));
    }
}
