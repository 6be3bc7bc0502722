//! # Domain Module
//!
//! Queries, ledger state, the result cache and the relayer gate.

pub mod entities;
pub mod errors;
pub mod relayer_gate;
pub mod result_cache;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use relayer_gate::*;
pub use result_cache::*;
pub use value_objects::*;
