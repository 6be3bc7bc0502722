//! # Cross-Ledger Query Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/   # End-to-end flows across gateway, light clients and verifier
//! └── benches/           # Proof verification and delivery benchmarks
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p xq-tests
//! cargo bench -p xq-tests
//! ```

pub mod integration;
