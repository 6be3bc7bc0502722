use shared_types::{ErrorKind, Hash};
use thiserror::Error;

/// Failures while checking a Merkle Patricia proof.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProofError {
    /// A proof node does not hash to the reference that points at it.
    #[error("Bad hash: expected {expected:?}, got {actual:?}")]
    BadHash { expected: Hash, actual: Hash },

    /// The proof ended before the path was resolved.
    #[error("Incomplete proof: missing node at depth {depth}")]
    IncompleteProof { depth: usize },

    /// Nodes were left over after the path was resolved.
    #[error("Unused proof nodes: {unused}")]
    UnusedNodes { unused: usize },

    /// Proof exceeds the traversal limit.
    #[error("Proof too deep: {depth} nodes, max {max}")]
    ProofTooDeep { depth: usize, max: usize },

    /// Structurally invalid node.
    #[error("Invalid trie node: {0}")]
    InvalidNode(&'static str),

    /// Leaf payload is not valid RLP.
    #[error("RLP decoding failed: {0}")]
    Rlp(#[from] rlp::DecoderError),
}

impl ProofError {
    /// Every proof failure is a retryable proof error.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Proof
    }
}
