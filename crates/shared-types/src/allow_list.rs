//! # Bounded Allow-List
//!
//! Capacity-limited membership set used for relayers and light-client
//! whitelists. Capacity is enforced when members are added, never at
//! lookup time.

use crate::entities::Address;
use crate::errors::AllowListError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A bounded set of principals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowList {
    members: BTreeSet<Address>,
    capacity: usize,
}

impl AllowList {
    /// Create an empty list holding at most `capacity` members.
    pub fn new(capacity: usize) -> Self {
        Self {
            members: BTreeSet::new(),
            capacity,
        }
    }

    /// Add all `addresses`, or none of them if the batch would not fit.
    ///
    /// Returns the addresses that were not already members.
    pub fn add_all(&mut self, addresses: &[Address]) -> Result<Vec<Address>, AllowListError> {
        if addresses.iter().any(|a| a.is_zero()) {
            return Err(AllowListError::ZeroAddress);
        }
        let mut fresh: Vec<Address> = Vec::new();
        for address in addresses {
            if !self.members.contains(address) && !fresh.contains(address) {
                fresh.push(*address);
            }
        }
        if self.members.len() + fresh.len() > self.capacity {
            return Err(AllowListError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.members.extend(fresh.iter().copied());
        Ok(fresh)
    }

    /// Remove all `addresses`. Returns the ones that were members.
    pub fn remove_all(&mut self, addresses: &[Address]) -> Vec<Address> {
        addresses
            .iter()
            .filter(|a| self.members.remove(*a))
            .copied()
            .collect()
    }

    /// Membership check.
    pub fn contains(&self, address: &Address) -> bool {
        self.members.contains(address)
    }

    /// Current member count.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when there are no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Maximum member count.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Members in address order.
    pub fn members(&self) -> impl Iterator<Item = &Address> {
        self.members.iter()
    }
}
