//! # Iterative Proof Verification
//!
//! Loop-based Merkle Patricia proof verification. Proof length is bounded
//! by `MAX_PROOF_DEPTH` and the walk never recurses, so an oversized proof
//! cannot exhaust the stack.
//!
//! ## Nibble-Walking Loop
//!
//! 1. Resolve the expected node: the next proof node (checked against the
//!    expected hash) or the inline bytes embedded in the parent.
//! 2. Decode it and consume the matching part of the key.
//! 3. Stop at a leaf, at an empty branch slot, or at a diverging path.
//!
//! A diverging path or an empty slot is a valid proof of absence. Every
//! supplied node must be consumed by the walk.

use super::entities::{AccountState, EMPTY_TRIE_ROOT, MAX_PROOF_DEPTH};
use super::errors::ProofError;
use super::nibbles::Nibbles;
use super::node::{NodeRef, TrieNode};
use shared_types::{keccak256, Address, Hash, H256};

/// Walk `proof` from `root` along `key` (the trie key bytes, already hashed).
///
/// Returns the stored value, or `None` if the proof shows the key is absent.
pub fn get_trie_value(
    root: &Hash,
    key: &[u8],
    proof: &[Vec<u8>],
) -> Result<Option<Vec<u8>>, ProofError> {
    if proof.len() > MAX_PROOF_DEPTH {
        return Err(ProofError::ProofTooDeep {
            depth: proof.len(),
            max: MAX_PROOF_DEPTH,
        });
    }
    if proof.is_empty() {
        if *root == EMPTY_TRIE_ROOT {
            return Ok(None);
        }
        return Err(ProofError::IncompleteProof { depth: 0 });
    }

    let path = Nibbles::from_bytes(key);
    let mut nibble_idx = 0;
    let mut used = 0;
    let mut expected = NodeRef::Hash(*root);

    let found = loop {
        let encoded = match expected {
            NodeRef::Hash(hash) => {
                let raw = proof
                    .get(used)
                    .ok_or(ProofError::IncompleteProof { depth: used })?;
                let actual = keccak256(raw);
                if actual != hash {
                    return Err(ProofError::BadHash {
                        expected: hash,
                        actual,
                    });
                }
                used += 1;
                raw.clone()
            }
            NodeRef::Inline(raw) => raw,
        };

        match TrieNode::decode(&encoded)? {
            TrieNode::Leaf { path: leaf_path, value } => {
                if path.slice(nibble_idx) == leaf_path.0.as_slice() {
                    break Some(value);
                }
                break None;
            }

            TrieNode::Extension { path: ext_path, child } => {
                let remaining = path.slice(nibble_idx);
                if !remaining.starts_with(&ext_path.0) {
                    break None;
                }
                nibble_idx += ext_path.len();
                expected = child;
            }

            TrieNode::Branch { children, value } => {
                let Some(nibble) = path.at(nibble_idx) else {
                    break value;
                };
                nibble_idx += 1;
                match &children[nibble as usize] {
                    Some(child) => expected = child.clone(),
                    None => break None,
                }
            }
        }
    };

    if used != proof.len() {
        return Err(ProofError::UnusedNodes {
            unused: proof.len() - used,
        });
    }
    Ok(found)
}

/// Verify an account proof and return the decoded account, if present.
pub fn verify_account(
    root: &Hash,
    address: &Address,
    proof: &[Vec<u8>],
) -> Result<Option<AccountState>, ProofError> {
    let key = keccak256(address.as_bytes());
    match get_trie_value(root, key.as_bytes(), proof)? {
        Some(encoded) => Ok(Some(rlp::decode(&encoded)?)),
        None => Ok(None),
    }
}

/// Verify an account proof and return the account's storage root.
///
/// An account proven absent has the empty storage root.
pub fn verify_account_proof(
    root: &Hash,
    address: &Address,
    proof: &[Vec<u8>],
) -> Result<Hash, ProofError> {
    Ok(verify_account(root, address, proof)?
        .map(|account| account.storage_root)
        .unwrap_or(EMPTY_TRIE_ROOT))
}

/// Verify a storage proof and return the stored value.
///
/// `path` is the trie key, i.e. the Keccak256 of the slot. Values shorter
/// than a 32-byte word are left-padded to a full word; longer values are
/// returned whole. A slot proven absent yields the empty value.
pub fn verify_storage_proof(
    root: &Hash,
    path: &H256,
    proof: &[Vec<u8>],
) -> Result<Vec<u8>, ProofError> {
    let Some(encoded) = get_trie_value(root, path.as_bytes(), proof)? else {
        return Ok(Vec::new());
    };
    let payload = rlp::Rlp::new(&encoded).data()?.to_vec();
    if payload.len() >= 32 {
        return Ok(payload);
    }
    let mut word = vec![0u8; 32];
    word[32 - payload.len()..].copy_from_slice(&payload);
    Ok(word)
}
