//! # Hashing
//!
//! Keccak-256 helpers and the two derived identifiers of the protocol:
//! cache keys and query ids.

use crate::entities::{Address, ChainId, Hash, QueryId, H256, U256};
use sha3::{Digest, Keccak256};

/// Keccak-256 of `data`.
pub fn keccak256(data: &[u8]) -> Hash {
    H256::from_slice(&Keccak256::digest(data))
}

/// Big-endian 32-byte encoding of an unsigned integer.
pub fn be_word(value: U256) -> [u8; 32] {
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    word
}

/// Cache key for one storage slot: `keccak256(be256(chain) ++ address ++ slot)`.
pub fn cache_key(chain_id: ChainId, address: &Address, slot: &H256) -> Hash {
    let mut preimage = Vec::with_capacity(32 + 20 + 32);
    preimage.extend_from_slice(&be_word(U256::from(chain_id)));
    preimage.extend_from_slice(address.as_bytes());
    preimage.extend_from_slice(slot.as_bytes());
    keccak256(&preimage)
}

/// Query id: `keccak256(encoded_request ++ be256(nonce))`.
pub fn query_id(encoded_request: &[u8], nonce: u64) -> QueryId {
    let mut preimage = Vec::with_capacity(encoded_request.len() + 32);
    preimage.extend_from_slice(encoded_request);
    preimage.extend_from_slice(&be_word(U256::from(nonce)));
    keccak256(&preimage)
}
