//! # Query Proof Verification
//!
//! Checks a delivered proof against the approved state roots:
//!
//! 1. the group's (chain, height) must have an approved root
//! 2. the account proof must hang from exactly that root
//! 3. each storage proof must hang from the proven storage root
//! 4. each slot is looked up at `keccak256(slot)`
//!
//! A slot proven absent verifies and yields an empty value.

use crate::domain::{ApprovedStateRoots, LightClientError, ProofGroup, VerifiedSlot};
use shared_types::{keccak256, Address, ChainId, H256, U256};
use xq_01_proof_verifier::{
    verify_account_proof, verify_storage_proof, AccountProof, ProofTrie, StorageProof,
};

/// Verify every group and flatten the values in delivery order.
pub fn verify_query_proof(
    roots: &ApprovedStateRoots,
    groups: &[ProofGroup],
) -> Result<Vec<VerifiedSlot>, LightClientError> {
    let mut values = Vec::new();
    for group in groups {
        let approved = roots.get(group.dst_chain_id, group.height).ok_or(
            LightClientError::StateRootNotApproved {
                chain_id: group.dst_chain_id,
                height: group.height,
            },
        )?;
        if group.account.root != approved {
            return Err(LightClientError::DifferentTrieRoots {
                approved,
                actual: group.account.root,
            });
        }

        let storage_root =
            verify_account_proof(&group.account.root, &group.account.account, &group.account.proof)?;

        for storage in &group.storage {
            if storage.root != storage_root {
                return Err(LightClientError::StorageRootMismatch {
                    expected: storage_root,
                    actual: storage.root,
                });
            }
            let value =
                verify_storage_proof(&storage.root, &keccak256(storage.path.as_bytes()), &storage.proof)?;
            values.push(VerifiedSlot {
                dst_chain_id: group.dst_chain_id,
                height: group.height,
                account: group.account.account,
                slot: storage.path,
                value,
            });
        }
    }
    Ok(values)
}

/// Assemble a proof group from a block's account trie and one account's storage trie.
///
/// This is the relayer side of the exchange: given the tries (or data
/// fetched with `eth_getProof`), it produces the group the gateway accepts.
pub fn assemble_proof_group(
    dst_chain_id: ChainId,
    height: U256,
    accounts: &ProofTrie,
    account: Address,
    storage: &ProofTrie,
    slots: &[H256],
) -> ProofGroup {
    let storage_root = storage.root();
    ProofGroup {
        dst_chain_id,
        height,
        account: AccountProof {
            root: accounts.root(),
            account,
            proof: accounts.account_proof(&account),
        },
        storage: slots
            .iter()
            .map(|slot| StorageProof {
                root: storage_root,
                path: *slot,
                proof: storage.storage_proof(slot),
            })
            .collect(),
    }
}
