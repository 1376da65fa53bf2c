//! Ethereum network constants.
//!
//! Chain IDs of the public networks and the names they are reported under.

// ============================================================================
// Chain IDs
// ============================================================================

/// Ethereum Mainnet chain ID.
pub const ETHEREUM_MAINNET_CHAIN_ID: u64 = 1;

/// Ropsten testnet chain ID.
pub const ROPSTEN_CHAIN_ID: u64 = 3;

/// Rinkeby testnet chain ID.
pub const RINKEBY_CHAIN_ID: u64 = 4;

/// Goerli testnet chain ID.
pub const GOERLI_CHAIN_ID: u64 = 5;

/// Kovan testnet chain ID.
pub const KOVAN_CHAIN_ID: u64 = 42;

/// Holesky testnet chain ID.
pub const HOLESKY_CHAIN_ID: u64 = 17000;

/// Sepolia testnet chain ID.
pub const SEPOLIA_CHAIN_ID: u64 = 11155111;

// ============================================================================
// Network names
// ============================================================================

/// Name reported for any chain not listed below.
pub const PRIVATE_NETWORK_NAME: &str = "private";

/// Name under which a chain ID is reported.
pub fn network_name(chain_id: u64) -> &'static str {
    match chain_id {
        ETHEREUM_MAINNET_CHAIN_ID => "main",
        ROPSTEN_CHAIN_ID => "ropsten",
        RINKEBY_CHAIN_ID => "rinkeby",
        GOERLI_CHAIN_ID => "goerli",
        KOVAN_CHAIN_ID => "kovan",
        HOLESKY_CHAIN_ID => "holesky",
        SEPOLIA_CHAIN_ID => "sepolia",
        _ => PRIVATE_NETWORK_NAME,
    }
}
