//! # Callback Dispatcher
//!
//! Hands verified values to the requester's receiver inside a
//! failure-capturing boundary. Receiver errors and panics both become a
//! [`CallbackOutcome::Failed`]; nothing propagates to the ledger.

use crate::domain::CallbackOutcome;
use crate::ports::QueryReceiver;
use shared_types::{Address, QueryId};
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::warn;

/// Registry of receivers and the boundary around them.
#[derive(Default)]
pub struct CallbackDispatcher {
    receivers: HashMap<Address, Arc<dyn QueryReceiver>>,
}

impl CallbackDispatcher {
    /// Empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `receiver` reachable as `callback`.
    pub fn register(&mut self, callback: Address, receiver: Arc<dyn QueryReceiver>) {
        self.receivers.insert(callback, receiver);
    }

    /// Whether `callback` implements a receiver.
    pub fn is_receiver(&self, callback: &Address) -> bool {
        self.receivers.contains_key(callback)
    }

    /// Deliver values to `callback`.
    pub fn deliver(
        &self,
        callback: Address,
        query_id: QueryId,
        message: &[u8],
        light_client: Address,
        values: &[Vec<u8>],
    ) -> CallbackOutcome {
        let Some(receiver) = self.receivers.get(&callback) else {
            return CallbackOutcome::Failed {
                reason: format!("no receiver at {callback:?}"),
            };
        };

        let result = catch_unwind(AssertUnwindSafe(|| {
            receiver.receive_query(query_id, message, light_client, values)
        }));
        let reason = match result {
            Ok(Ok(())) => return CallbackOutcome::Delivered,
            Ok(Err(e)) => e.to_string(),
            Err(payload) => panic_message(payload.as_ref()),
        };

        warn!(query_id = ?query_id, reason = %reason, "[xq-03] Receiver failed");
        CallbackOutcome::Failed { reason }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "receiver panicked".to_string()
    }
}
