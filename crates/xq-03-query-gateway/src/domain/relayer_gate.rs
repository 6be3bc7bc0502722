//! # Relayer Gate
//!
//! Bounded allow-list of principals entitled to deliver proofs.

use shared_types::{Address, AllowList, AllowListError};

/// Relayer allow-list.
#[derive(Debug, Clone)]
pub struct RelayerGate {
    relayers: AllowList,
}

impl RelayerGate {
    /// Empty gate admitting at most `capacity` relayers.
    pub fn new(capacity: usize) -> Self {
        Self {
            relayers: AllowList::new(capacity),
        }
    }

    /// Admit `relayers`, all or none. Returns the newly admitted ones.
    pub fn add(&mut self, relayers: &[Address]) -> Result<Vec<Address>, AllowListError> {
        self.relayers.add_all(relayers)
    }

    /// Revoke `relayers`. Returns the ones that were members.
    pub fn remove(&mut self, relayers: &[Address]) -> Vec<Address> {
        self.relayers.remove_all(relayers)
    }

    /// Whether `caller` may deliver proofs.
    pub fn is_relayer(&self, caller: &Address) -> bool {
        self.relayers.contains(caller)
    }

    /// Current relayers.
    pub fn relayers(&self) -> Vec<Address> {
        self.relayers.members().copied().collect()
    }
}
