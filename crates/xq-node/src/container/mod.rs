//! # Container Module
//!
//! Configuration loading and service wiring.

pub mod config;
pub mod services;

pub use config::{ConfigError, NodeConfig, PrincipalsConfig, RuntimeConfig};
pub use services::ServiceContainer;
