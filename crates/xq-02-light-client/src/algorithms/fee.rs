//! # Fee Estimation
//!
//! Node-operator requests cost gas on the delivery path plus a fixed
//! oracle fee:
//!
//! ```text
//! fee = (queries × per_query_gas + base_gas_limit) × gas_price + oracle_fee
//! ```

use shared_types::U256;

/// Fee for a node-operator request of `query_count` subqueries.
///
/// Saturates instead of overflowing.
pub fn node_operator_fee(
    query_count: usize,
    per_query_gas: u64,
    base_gas_limit: u64,
    gas_price: U256,
    oracle_fee: U256,
) -> U256 {
    let gas = U256::from(query_count)
        .saturating_mul(U256::from(per_query_gas))
        .saturating_add(U256::from(base_gas_limit));
    gas.saturating_mul(gas_price).saturating_add(oracle_fee)
}
