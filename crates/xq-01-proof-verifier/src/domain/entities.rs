//! # Proof Entities
//!
//! Account state as stored in the account trie, and the account and storage
//! proofs a relayer submits. Proof nodes are the RLP-encoded trie nodes from
//! the root down to the leaf, the same shape `eth_getProof` returns.

use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use serde::{Deserialize, Serialize};
use shared_types::{list_items, Address, Hash, H256, U256};

/// Keccak256 of RLP(""), the root of an empty trie.
/// Value: 0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421
pub const EMPTY_TRIE_ROOT: Hash = H256([
    0x56, 0xe8, 0x1f, 0x17, 0x1b, 0xcc, 0x55, 0xa6, 0xff, 0x83, 0x45, 0xe6, 0x92, 0xc0, 0xf8, 0x6e,
    0x5b, 0x48, 0xe0, 0x1b, 0x99, 0x6c, 0xad, 0xc0, 0x01, 0x62, 0x2f, 0xb5, 0xe3, 0x63, 0xb4, 0x21,
]);

/// Keccak256 of the empty byte string, the code hash of accounts without code.
pub const EMPTY_CODE_HASH: Hash = H256([
    0xc5, 0xd2, 0x46, 0x01, 0x86, 0xf7, 0x23, 0x3c, 0x92, 0x7e, 0x7d, 0xb2, 0xdc, 0xc7, 0x03, 0xc0,
    0xe5, 0x00, 0xb6, 0x53, 0xca, 0x82, 0x27, 0x3b, 0x7b, 0xfa, 0xd8, 0x04, 0x5d, 0x85, 0xa4, 0x70,
]);

/// Maximum number of nodes walked for a single key.
///
/// A 64-nibble key can pass through at most one branch or extension per
/// nibble plus the leaf.
pub const MAX_PROOF_DEPTH: usize = 65;

/// Account state stored in the account trie.
///
/// RLP-encoded as: [nonce, balance, storage_root, code_hash]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    /// Transaction count.
    pub nonce: u64,
    /// Balance in base units.
    pub balance: U256,
    /// Root of the account's storage trie.
    pub storage_root: Hash,
    /// Keccak256 of the account's code.
    pub code_hash: Hash,
}

impl Default for AccountState {
    fn default() -> Self {
        Self {
            nonce: 0,
            balance: U256::zero(),
            storage_root: EMPTY_TRIE_ROOT,
            code_hash: EMPTY_CODE_HASH,
        }
    }
}

impl AccountState {
    /// Account with the given storage root and defaults elsewhere.
    pub fn with_storage_root(storage_root: Hash) -> Self {
        Self {
            storage_root,
            ..Default::default()
        }
    }

    /// RLP encoding, the value stored in the account trie.
    pub fn rlp_bytes(&self) -> Vec<u8> {
        rlp::encode(self).to_vec()
    }
}

impl Encodable for AccountState {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(4);
        s.append(&self.nonce);
        s.append(&self.balance);
        s.append(&self.storage_root);
        s.append(&self.code_hash);
    }
}

impl Decodable for AccountState {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if rlp.item_count()? != 4 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        Ok(Self {
            nonce: rlp.val_at(0)?,
            balance: rlp.val_at(1)?,
            storage_root: rlp.val_at(2)?,
            code_hash: rlp.val_at(3)?,
        })
    }
}

/// Inclusion (or exclusion) proof of one account under a state root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProof {
    /// State root the proof claims to hang from.
    pub root: Hash,
    /// Proven account.
    pub account: Address,
    /// RLP-encoded nodes from the root to the leaf.
    pub proof: Vec<Vec<u8>>,
}

/// Inclusion (or exclusion) proof of one storage slot under a storage root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageProof {
    /// Storage root the proof claims to hang from.
    pub root: Hash,
    /// Storage slot pre-image; the trie key is its Keccak256.
    pub path: H256,
    /// RLP-encoded nodes from the root to the leaf.
    pub proof: Vec<Vec<u8>>,
}

fn append_nodes(s: &mut RlpStream, nodes: &[Vec<u8>]) {
    s.begin_list(nodes.len());
    for node in nodes {
        s.append(node);
    }
}

impl Encodable for AccountProof {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(3);
        s.append(&self.root);
        s.append(&self.account);
        append_nodes(s, &self.proof);
    }
}

impl Decodable for AccountProof {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if rlp.item_count()? != 3 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        Ok(Self {
            root: rlp.val_at(0)?,
            account: rlp.val_at(1)?,
            proof: list_items(&rlp.at(2)?)?,
        })
    }
}

impl Encodable for StorageProof {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(3);
        s.append(&self.root);
        s.append(&self.path);
        append_nodes(s, &self.proof);
    }
}

impl Decodable for StorageProof {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if rlp.item_count()? != 3 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        Ok(Self {
            root: rlp.val_at(0)?,
            path: rlp.val_at(1)?,
            proof: list_items(&rlp.at(2)?)?,
        })
    }
}
