//! # Application Layer
//!
//! The query ledger and the callback boundary it delivers through.

pub mod dispatcher;
pub mod ledger;

pub use dispatcher::CallbackDispatcher;
pub use ledger::QueryLedger;
