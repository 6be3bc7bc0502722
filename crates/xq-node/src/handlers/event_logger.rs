//! # Event Logger
//!
//! Logs every notification on the bus until the bus is dropped.

use shared_bus::{GatewayEvent, Subscription};
use tracing::{info, warn};

/// Bus consumer writing one log line per event.
pub struct EventLogger {
    subscription: Subscription,
}

impl EventLogger {
    /// Log events received through `subscription`.
    pub fn new(subscription: Subscription) -> Self {
        Self { subscription }
    }

    /// Run until the bus closes. Returns the number of events logged.
    pub async fn run(mut self) -> u64 {
        let mut logged = 0;
        while let Some(event) = self.subscription.recv().await {
            log_event(&event);
            logged += 1;
        }
        info!(logged, "Event logger stopped");
        logged
    }
}

fn log_event(event: &GatewayEvent) {
    match event {
        GatewayEvent::QuerySent {
            query_id,
            light_client,
            callback,
            ..
        } => info!(
            query_id = ?query_id,
            light_client = ?light_client,
            callback = ?callback,
            "[event] QuerySent"
        ),
        GatewayEvent::QueryDataSaved { key, height, value } => info!(
            key = ?key,
            height = %height,
            value = %hex::encode(value),
            "[event] QueryDataSaved"
        ),
        GatewayEvent::QueryCompleted {
            query_id, values, ..
        } => info!(query_id = ?query_id, values = values.len(), "[event] QueryCompleted"),
        GatewayEvent::ReceiverFailed { query_id, reason } => {
            warn!(query_id = ?query_id, reason = %reason, "[event] ReceiverFailed")
        }
        GatewayEvent::OracleNotified {
            light_client,
            request_id,
            encoded_requests,
            ..
        } => info!(
            light_client = ?light_client,
            request_id = ?request_id,
            requests = %hex::encode(encoded_requests),
            "[event] OracleNotified"
        ),
        GatewayEvent::HeaderUpdated {
            light_client,
            response,
        } => info!(
            light_client = ?light_client,
            chain_id = response.dst_chain_id,
            height = %response.height,
            root = ?response.root,
            "[event] HeaderUpdated"
        ),
        other => info!(event = ?other, "[event] Admin"),
    }
}
