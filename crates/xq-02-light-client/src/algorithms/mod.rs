//! # Algorithms Module
//!
//! Proof checking, fee estimation and oracle payload parsing.

pub mod fee;
pub mod proof_check;
pub mod response_parser;

pub use fee::node_operator_fee;
pub use proof_check::{assemble_proof_group, verify_query_proof};
pub use response_parser::{encode_compute_response, parse_compute_response};
