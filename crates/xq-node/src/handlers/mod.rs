//! # Handlers
//!
//! Long-running bus consumers spawned by the runtime.

pub mod event_logger;

pub use event_logger::EventLogger;
