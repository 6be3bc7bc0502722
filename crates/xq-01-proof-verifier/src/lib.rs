//! # xq-01-proof-verifier
//!
//! Stateless verification of Merkle Patricia account and storage proofs.
//!
//! ## Role in System
//!
//! - **Pure functions**: no state, no I/O, no logging on the hot path
//! - **Consumers**: light-client adapters call it once per account group
//!   and once per storage slot while verifying a delivered proof
//!
//! ## Verification Chain
//!
//! ```text
//! approved state root
//!        │ verify_account_proof(root, address, nodes)
//!        ↓
//! account storage root
//!        │ verify_storage_proof(storage_root, keccak256(slot), nodes)
//!        ↓
//! storage value (32-byte word, longer payload, or empty when absent)
//! ```
//!
//! ## Security
//!
//! - Every hashed node is checked against the reference that points at it
//! - Proof length is bounded and traversal is iterative
//! - Leftover nodes are rejected

#![warn(clippy::all)]

pub mod domain;
pub mod trie;

pub use domain::{
    get_trie_value, verify_account, verify_account_proof, verify_storage_proof, AccountProof,
    AccountState, ProofError, StorageProof, EMPTY_CODE_HASH, EMPTY_TRIE_ROOT, MAX_PROOF_DEPTH,
};
pub use trie::{storage_value, ProofTrie};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
