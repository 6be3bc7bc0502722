//! Gas Price Feed Adapter
//!
//! Implements `GasPriceFeed` with an operator-settable price.

use crate::ports::outbound::GasPriceFeed;
use parking_lot::RwLock;
use shared_types::U256;
use tracing::debug;

/// Gas price set by the operator.
pub struct ManualGasPriceFeed {
    price: RwLock<U256>,
}

impl ManualGasPriceFeed {
    /// Create a feed at `price`.
    pub fn new(price: U256) -> Self {
        Self {
            price: RwLock::new(price),
        }
    }

    /// Update the price.
    pub fn set_price(&self, price: U256) {
        debug!("[xq-02] Gas price set to {}", price);
        *self.price.write() = price;
    }
}

impl GasPriceFeed for ManualGasPriceFeed {
    fn gas_price(&self) -> U256 {
        *self.price.read()
    }
}
