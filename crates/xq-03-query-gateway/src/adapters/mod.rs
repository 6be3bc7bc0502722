//! # Adapters
//!
//! In-memory implementation of the receiver port.

pub mod receiver_store;

pub use receiver_store::InMemoryReceiver;
