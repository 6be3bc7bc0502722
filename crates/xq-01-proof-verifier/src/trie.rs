//! # Proof Trie
//!
//! In-memory secure Merkle Patricia trie that computes roots and emits
//! proofs in the format the verifier consumes. This is how a relayer turns
//! fetched account and storage data into a deliverable proof, and how tests
//! obtain genuine proofs.
//!
//! Keys are hashed before insertion (`keccak256(address)` for accounts,
//! `keccak256(slot)` for storage), so every path is 64 nibbles.

use crate::domain::entities::{AccountState, EMPTY_TRIE_ROOT};
use crate::domain::nibbles::Nibbles;
use crate::domain::node::{NodeRef, TrieNode};
use shared_types::{keccak256, Address, Hash, H256};
use std::collections::BTreeMap;

/// Width of one storage word.
const WORD_LEN: usize = 32;

/// RLP encoding of a storage value as stored in a storage trie.
///
/// A value of at most one word drops its leading zero bytes, as in Ethereum
/// storage. Longer payloads are stored byte for byte.
pub fn storage_value(value: &[u8]) -> Vec<u8> {
    if value.len() > WORD_LEN {
        return rlp::encode(&value.to_vec()).to_vec();
    }
    let first = value.iter().position(|b| *b != 0).unwrap_or(value.len());
    rlp::encode(&value[first..].to_vec()).to_vec()
}

type Entry<'a> = (Nibbles, &'a [u8]);

/// Secure Merkle Patricia trie builder.
#[derive(Debug, Clone, Default)]
pub struct ProofTrie {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl ProofTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw trie key and stored value.
    pub fn insert(&mut self, key: &[u8], value: Vec<u8>) {
        self.entries.insert(key.to_vec(), value);
    }

    /// Insert an account under `keccak256(address)`.
    pub fn insert_account(&mut self, address: &Address, account: &AccountState) {
        self.insert(keccak256(address.as_bytes()).as_bytes(), account.rlp_bytes());
    }

    /// Insert a storage value under `keccak256(slot)`. An all-zero word removes the slot.
    pub fn insert_storage(&mut self, slot: &H256, value: &[u8]) {
        let key = keccak256(slot.as_bytes());
        if value.len() <= WORD_LEN && value.iter().all(|b| *b == 0) {
            self.entries.remove(key.as_bytes());
        } else {
            self.insert(key.as_bytes(), storage_value(value));
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Root hash of the trie.
    pub fn root(&self) -> Hash {
        if self.entries.is_empty() {
            return EMPTY_TRIE_ROOT;
        }
        keccak256(&build(&self.items(), 0).rlp_encode())
    }

    /// Proof nodes for a raw trie key (inclusion or exclusion).
    pub fn proof(&self, key: &[u8]) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        if !self.entries.is_empty() {
            collect_proof(&self.items(), 0, &Nibbles::from_bytes(key), true, &mut out);
        }
        out
    }

    /// Proof for an account.
    pub fn account_proof(&self, address: &Address) -> Vec<Vec<u8>> {
        self.proof(keccak256(address.as_bytes()).as_bytes())
    }

    /// Proof for a storage slot.
    pub fn storage_proof(&self, slot: &H256) -> Vec<Vec<u8>> {
        self.proof(keccak256(slot.as_bytes()).as_bytes())
    }

    fn items(&self) -> Vec<Entry<'_>> {
        self.entries
            .iter()
            .map(|(k, v)| (Nibbles::from_bytes(k), v.as_slice()))
            .collect()
    }
}

fn shared_prefix(items: &[Entry<'_>], depth: usize) -> usize {
    let first = items[0].0.slice(depth);
    items[1..]
        .iter()
        .map(|(path, _)| {
            path.slice(depth)
                .iter()
                .zip(first)
                .take_while(|(a, b)| a == b)
                .count()
        })
        .min()
        .unwrap_or(first.len())
}

fn subset<'a>(items: &[Entry<'a>], depth: usize, nibble: u8) -> Vec<Entry<'a>> {
    items
        .iter()
        .filter(|(path, _)| path.at(depth) == Some(nibble))
        .cloned()
        .collect()
}

/// Build the node covering `items`, all of which share the first `depth` nibbles.
fn build(items: &[Entry<'_>], depth: usize) -> TrieNode {
    if let [(path, value)] = items {
        return TrieNode::Leaf {
            path: Nibbles(path.slice(depth).to_vec()),
            value: value.to_vec(),
        };
    }

    let prefix = shared_prefix(items, depth);
    if prefix > 0 {
        let child = build(items, depth + prefix);
        return TrieNode::Extension {
            path: Nibbles(items[0].0.slice(depth)[..prefix].to_vec()),
            child: NodeRef::for_encoded(child.rlp_encode()),
        };
    }

    let mut children: Box<[Option<NodeRef>; 16]> = Box::default();
    for (nibble, slot) in (0u8..16).zip(children.iter_mut()) {
        let group = subset(items, depth, nibble);
        if !group.is_empty() {
            *slot = Some(NodeRef::for_encoded(build(&group, depth + 1).rlp_encode()));
        }
    }
    let value = items
        .iter()
        .find(|(path, _)| path.len() == depth)
        .map(|(_, value)| value.to_vec());
    TrieNode::Branch { children, value }
}

fn collect_proof(
    items: &[Entry<'_>],
    depth: usize,
    key: &Nibbles,
    is_root: bool,
    out: &mut Vec<Vec<u8>>,
) {
    let node = build(items, depth);
    let encoded = node.rlp_encode();
    if is_root || encoded.len() >= 32 {
        out.push(encoded);
    }

    match node {
        TrieNode::Leaf { .. } => {}
        TrieNode::Extension { path, .. } => {
            if key.slice(depth).starts_with(&path.0) {
                collect_proof(items, depth + path.len(), key, false, out);
            }
        }
        TrieNode::Branch { .. } => {
            if let Some(nibble) = key.at(depth) {
                let group = subset(items, depth, nibble);
                if !group.is_empty() {
                    collect_proof(&group, depth + 1, key, false, out);
                }
            }
        }
    }
}
