//! # Domain Value Objects
//!
//! The proof envelope a relayer delivers and the verified values it yields.
//!
//! ```text
//! proof = [[dstChainId, height, bytes(rlp([account, [storage, ...]]))], ...]
//! ```

use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use serde::{Deserialize, Serialize};
use shared_types::{decode_list, list_items, Address, ChainId, SubQuery, H256, U256};
use xq_01_proof_verifier::{AccountProof, StorageProof};

/// Proofs for every slot of one account at one (chain, height).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofGroup {
    /// Destination chain.
    pub dst_chain_id: ChainId,
    /// Block height.
    pub height: U256,
    /// Account proof under the block's state root.
    pub account: AccountProof,
    /// Storage proofs under the account's storage root, in subquery order.
    pub storage: Vec<StorageProof>,
}

impl ProofGroup {
    fn inner_bytes(&self) -> Vec<u8> {
        let mut s = RlpStream::new_list(2);
        s.append(&self.account);
        s.begin_list(self.storage.len());
        for proof in &self.storage {
            s.append(proof);
        }
        s.out().to_vec()
    }
}

impl Encodable for ProofGroup {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(3);
        s.append(&self.dst_chain_id);
        s.append(&self.height);
        s.append(&self.inner_bytes());
    }
}

impl Decodable for ProofGroup {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if rlp.item_count()? != 3 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        let inner_bytes = rlp.at(2)?.data()?;
        let inner = Rlp::new(inner_bytes);
        if inner.payload_info()?.total() != inner_bytes.len() {
            return Err(DecoderError::RlpInconsistentLengthAndData);
        }
        if inner.item_count()? != 2 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        Ok(Self {
            dst_chain_id: rlp.val_at(0)?,
            height: rlp.val_at(1)?,
            account: inner.val_at(0)?,
            storage: list_items(&inner.at(1)?)?,
        })
    }
}

/// Ordered proof groups covering a whole query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryProof {
    /// Groups in subquery order.
    pub groups: Vec<ProofGroup>,
}

impl QueryProof {
    /// Wrap groups.
    pub fn new(groups: Vec<ProofGroup>) -> Self {
        Self { groups }
    }

    /// Wire encoding delivered to the gateway.
    pub fn encode(&self) -> Vec<u8> {
        let mut s = RlpStream::new_list(self.groups.len());
        for group in &self.groups {
            s.append(group);
        }
        s.out().to_vec()
    }

    /// Decode a delivered proof.
    pub fn decode_bytes(bytes: &[u8]) -> Result<Self, DecoderError> {
        Ok(Self {
            groups: decode_list(bytes)?,
        })
    }

    /// Number of storage values the proof yields.
    pub fn value_count(&self) -> usize {
        self.groups.iter().map(|g| g.storage.len()).sum()
    }
}

/// One value proven against an approved state root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedSlot {
    /// Destination chain.
    pub dst_chain_id: ChainId,
    /// Block height.
    pub height: U256,
    /// Account the slot belongs to.
    pub account: Address,
    /// Slot pre-image.
    pub slot: H256,
    /// Value: a 32-byte word, a longer payload, or empty when absent.
    pub value: Vec<u8>,
}

impl VerifiedSlot {
    /// Whether this value was proven for `query`.
    pub fn answers(&self, query: &SubQuery) -> bool {
        self.dst_chain_id == query.dst_chain_id
            && self.height == query.height
            && self.account == query.to
            && self.slot == query.slot
    }
}
