//! # Adapters
//!
//! In-memory implementations of the outbound ports.

pub mod gas_price;
pub mod oracle;

pub use gas_price::ManualGasPriceFeed;
pub use oracle::{InMemoryOracleNetwork, OracleJob};
