//! Contract façade module.
//!
//! Wraps an ABI and bytecode into something that can be deployed or attached
//! to, with instance methods resolved from the ABI at runtime.

pub mod facade;
pub mod handle;

pub use facade::ContractFacade;
pub use handle::{ContractHandle, ContractMethod, MethodOutput};
