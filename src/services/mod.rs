//! Business logic services module.

pub mod gas;
pub mod transactions;

pub use gas::GasPolicy;
pub use transactions::TransactionService;
