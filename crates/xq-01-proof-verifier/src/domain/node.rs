use super::errors::ProofError;
use super::nibbles::Nibbles;
use rlp::{Rlp, RlpStream};
use shared_types::{keccak256, Hash};

// =============================================================================
// NODE REFERENCES
// =============================================================================

/// How a parent points at a child node.
///
/// Nodes whose encoding is shorter than 32 bytes are embedded in the parent
/// instead of being referenced by hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeRef {
    /// Hash of the child's RLP encoding.
    Hash(Hash),
    /// The child's RLP encoding itself.
    Inline(Vec<u8>),
}

impl NodeRef {
    /// Reference for an encoded node.
    pub fn for_encoded(encoded: Vec<u8>) -> Self {
        if encoded.len() < 32 {
            NodeRef::Inline(encoded)
        } else {
            NodeRef::Hash(keccak256(&encoded))
        }
    }

    fn append_to(&self, s: &mut RlpStream) {
        match self {
            NodeRef::Hash(hash) => {
                s.append(hash);
            }
            NodeRef::Inline(raw) => {
                s.append_raw(raw, 1);
            }
        }
    }

    fn decode(item: &Rlp) -> Result<Option<Self>, ProofError> {
        if item.is_list() {
            return Ok(Some(NodeRef::Inline(item.as_raw().to_vec())));
        }
        let data = item.data()?;
        match data.len() {
            0 => Ok(None),
            32 => Ok(Some(NodeRef::Hash(Hash::from_slice(data)))),
            _ => Err(ProofError::InvalidNode("child reference is neither hash nor inline")),
        }
    }
}

// =============================================================================
// TRIE NODE: The three stored node types in MPT
// =============================================================================

/// Node types in the Patricia Merkle Trie.
///
/// Per Ethereum Yellow Paper Appendix D. The empty node never appears inside
/// a proof; it only exists as the empty child slot of a branch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrieNode {
    /// Leaf node: stores remaining key path and the value.
    /// RLP: [hex_prefix_encode(path, true), value]
    Leaf {
        /// Remaining path from current position to this leaf.
        path: Nibbles,
        /// Stored value (RLP of an account or of a storage word).
        value: Vec<u8>,
    },

    /// Extension node: shared prefix optimization.
    /// RLP: [hex_prefix_encode(path, false), child]
    Extension {
        /// Shared prefix path.
        path: Nibbles,
        /// Child reference.
        child: NodeRef,
    },

    /// Branch node: 16-way branch for each nibble value.
    /// RLP: \[child\[0\], ..., child\[15\], value\]
    Branch {
        /// 16 child references (None = empty).
        children: Box<[Option<NodeRef>; 16]>,
        /// Optional value if a key terminates at this branch.
        value: Option<Vec<u8>>,
    },
}

impl TrieNode {
    /// RLP-encode this node.
    pub fn rlp_encode(&self) -> Vec<u8> {
        match self {
            TrieNode::Leaf { path, value } => {
                let mut s = RlpStream::new_list(2);
                s.append(&path.encode_hex_prefix(true));
                s.append(value);
                s.out().to_vec()
            }

            TrieNode::Extension { path, child } => {
                let mut s = RlpStream::new_list(2);
                s.append(&path.encode_hex_prefix(false));
                child.append_to(&mut s);
                s.out().to_vec()
            }

            TrieNode::Branch { children, value } => {
                let mut s = RlpStream::new_list(17);
                for child in children.iter() {
                    match child {
                        Some(reference) => reference.append_to(&mut s),
                        None => {
                            s.append_empty_data();
                        }
                    }
                }
                match value {
                    Some(v) => {
                        s.append(v);
                    }
                    None => {
                        s.append_empty_data();
                    }
                }
                s.out().to_vec()
            }
        }
    }

    /// Decode one RLP-encoded node.
    pub fn decode(raw: &[u8]) -> Result<Self, ProofError> {
        let rlp = Rlp::new(raw);
        if !rlp.is_list() {
            return Err(ProofError::InvalidNode("node is not a list"));
        }
        match rlp.item_count()? {
            2 => {
                let (path, is_leaf) = Nibbles::decode_hex_prefix(rlp.at(0)?.data()?)?;
                if is_leaf {
                    Ok(TrieNode::Leaf {
                        path,
                        value: rlp.at(1)?.data()?.to_vec(),
                    })
                } else {
                    let child = NodeRef::decode(&rlp.at(1)?)?
                        .ok_or(ProofError::InvalidNode("extension without child"))?;
                    Ok(TrieNode::Extension { path, child })
                }
            }
            17 => {
                let mut children: Box<[Option<NodeRef>; 16]> = Box::default();
                for (i, child) in children.iter_mut().enumerate() {
                    *child = NodeRef::decode(&rlp.at(i)?)?;
                }
                let value = rlp.at(16)?.data()?;
                Ok(TrieNode::Branch {
                    children,
                    value: (!value.is_empty()).then(|| value.to_vec()),
                })
            }
            _ => Err(ProofError::InvalidNode("unexpected item count")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_encoding_decodes_back() {
        let leaf = TrieNode::Leaf {
            path: Nibbles(vec![1, 2, 3, 4]),
            value: vec![0xAB, 0xCD],
        };
        assert_eq!(TrieNode::decode(&leaf.rlp_encode()).unwrap(), leaf);
    }

    #[test]
    fn test_branch_with_inline_child() {
        let small_leaf = TrieNode::Leaf {
            path: Nibbles(vec![5]),
            value: vec![0x01],
        };
        let mut children: Box<[Option<NodeRef>; 16]> = Box::default();
        children[3] = Some(NodeRef::for_encoded(small_leaf.rlp_encode()));
        children[7] = Some(NodeRef::Hash(Hash::repeat_byte(0x77)));
        let branch = TrieNode::Branch {
            children,
            value: None,
        };

        let decoded = TrieNode::decode(&branch.rlp_encode()).unwrap();
        assert_eq!(decoded, branch);
        match decoded {
            TrieNode::Branch { children, .. } => {
                assert!(matches!(children[3], Some(NodeRef::Inline(_))));
                assert!(children[0].is_none());
            }
            _ => panic!("expected branch"),
        }
    }

    #[test]
    fn test_non_list_rejected() {
        let encoded = rlp::encode(&vec![1u8, 2, 3]).to_vec();
        assert!(matches!(
            TrieNode::decode(&encoded),
            Err(ProofError::InvalidNode(_))
        ));
    }
}
