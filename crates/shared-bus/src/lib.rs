//! # Shared Bus - Notification Bus
//!
//! Carries the protocol's notifications from the query gateway and the
//! light-client adapters to relayers, requesters and loggers.
//!
//! ```text
//! ┌──────────────┐   publish()   ┌──────────────┐  subscribe()  ┌──────────┐
//! │ QueryLedger  │ ────────────→ │  Event Bus   │ ────────────→ │ Relayer  │
//! │ LightClients │               │ (broadcast)  │               │ Logger   │
//! └──────────────┘               └──────────────┘               └──────────┘
//! ```
//!
//! Publishing never blocks; an event published with no subscribers is
//! dropped and counted.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, GatewayEvent, GATEWAY_COMPONENT, LIGHT_CLIENT_COMPONENT};
pub use publisher::{EventPublisher, InMemoryEventBus, RecordingPublisher};
pub use subscriber::{Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
