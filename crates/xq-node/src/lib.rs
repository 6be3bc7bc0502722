//! # Node Runtime Library
//!
//! Exposes the runtime's modules for testing. The entry point is the
//! `xq-node` binary.
//!
//! - `container/` - configuration loading and service wiring
//! - `handlers/` - bus consumers (event logger)

#![warn(missing_docs)]

pub mod container;
pub mod handlers;

pub use container::{ConfigError, NodeConfig, ServiceContainer};
pub use handlers::EventLogger;
