//! # Shared Types Crate
//!
//! Entities, wire encodings, hashing helpers and error classification shared
//! by the query gateway, the light-client adapters and the proof verifier.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Deterministic Encoding**: Anything that is hashed into an identifier
//!   has exactly one RLP encoding.

pub mod allow_list;
pub mod encoding;
pub mod entities;
pub mod errors;
pub mod hashing;

pub use allow_list::AllowList;
pub use encoding::{decode_height_requests, decode_list, encode_height_requests, list_items};
pub use entities::*;
pub use errors::*;
pub use hashing::{be_word, cache_key, keccak256, query_id};
