//! Connection tracking module.
//!
//! Holds the node connection, its last known status and the observers that
//! want to hear when that status changes.

pub mod observers;
pub mod status;
pub mod tracker;

pub use observers::{ObserverId, ObserverRegistry, StatusCallback};
pub use status::{ConnectionStatus, StatusChange};
pub use tracker::ConnectionTracker;
