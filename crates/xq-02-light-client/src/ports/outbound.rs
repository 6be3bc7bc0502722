//! # Outbound Ports
//!
//! Traits for the external systems a light client depends on: the oracle
//! network it asks for state roots and the gas price feed used for fees.

use crate::domain::LightClientError;
use parking_lot::Mutex;
use shared_types::{keccak256, Address, H256, U256};

/// Oracle backend - outbound port.
///
/// Delivery of the answer is asynchronous and arrives later through
/// `update_header` / `fulfill` on the light client.
pub trait OracleBackend: Send + Sync {
    /// Send encoded height requests. Returns the oracle-side request id.
    fn send_request(
        &self,
        light_client: Address,
        encoded_requests: &[u8],
    ) -> Result<H256, LightClientError>;
}

/// Gas price feed - outbound port.
pub trait GasPriceFeed: Send + Sync {
    /// Current gas price in base units.
    fn gas_price(&self) -> U256;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock oracle that records requests.
#[derive(Default)]
pub struct MockOracle {
    /// Recorded (light client, payload) pairs.
    pub sent: Mutex<Vec<(Address, Vec<u8>)>>,
    /// Should return errors?
    pub should_fail: bool,
}

impl OracleBackend for MockOracle {
    fn send_request(
        &self,
        light_client: Address,
        encoded_requests: &[u8],
    ) -> Result<H256, LightClientError> {
        if self.should_fail {
            return Err(LightClientError::Oracle("Mock failure".to_string()));
        }
        let mut sent = self.sent.lock();
        sent.push((light_client, encoded_requests.to_vec()));
        Ok(keccak256(&(sent.len() as u64).to_be_bytes()))
    }
}

/// Mock gas price feed with a fixed price.
pub struct MockGasPrice(pub U256);

impl GasPriceFeed for MockGasPrice {
    fn gas_price(&self) -> U256 {
        self.0
    }
}
