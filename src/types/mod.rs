//! Type definitions module.
//!
//! Contains shared types used across the application.

pub mod network;
pub mod transaction;
pub mod units;

pub use network::*;
pub use transaction::*;
pub use units::*;
