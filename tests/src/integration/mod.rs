//! # Integration Tests
//!
//! Full query lifecycles through a wired node: submission, oracle
//! answers, relayer delivery, cache reads and receiver outcomes.

pub mod flows;
