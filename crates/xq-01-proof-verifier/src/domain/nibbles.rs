use super::errors::ProofError;

// =============================================================================
// NIBBLES: Half-byte path representation
// =============================================================================

/// Nibble path for trie traversal.
///
/// Trie keys are Keccak-256 hashes, so every full path is 64 nibbles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Nibbles(pub Vec<u8>);

impl Nibbles {
    /// Create nibbles from arbitrary bytes (used for hashed keys).
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut nibbles = Vec::with_capacity(bytes.len() * 2);
        for byte in bytes {
            nibbles.push(byte >> 4);
            nibbles.push(byte & 0x0F);
        }
        Nibbles(nibbles)
    }

    /// Nibbles from `start` to the end.
    pub fn slice(&self, start: usize) -> &[u8] {
        self.0.get(start..).unwrap_or(&[])
    }

    /// Length of the prefix shared with `other`.
    pub fn common_prefix_len(&self, other: &[u8]) -> usize {
        self.0
            .iter()
            .zip(other.iter())
            .take_while(|(a, b)| a == b)
            .count()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Nibble at `index`, if any.
    pub fn at(&self, index: usize) -> Option<u8> {
        self.0.get(index).copied()
    }

    /// Hex-prefix encoding (Yellow Paper, Appendix C).
    ///
    /// The high nibble of the first byte holds the flags:
    /// 0 = extension even, 1 = extension odd, 2 = leaf even, 3 = leaf odd.
    pub fn encode_hex_prefix(&self, is_leaf: bool) -> Vec<u8> {
        let odd = self.len() % 2 == 1;
        let flags = if is_leaf { 2 } else { 0 } + if odd { 1 } else { 0 };

        let mut result = Vec::with_capacity(self.len() / 2 + 1);
        let rest = if odd {
            result.push((flags << 4) | self.0[0]);
            &self.0[1..]
        } else {
            result.push(flags << 4);
            &self.0[..]
        };
        for pair in rest.chunks(2) {
            result.push((pair[0] << 4) | pair.get(1).copied().unwrap_or(0));
        }
        result
    }

    /// Decode hex-prefix bytes into a path and a leaf flag.
    pub fn decode_hex_prefix(encoded: &[u8]) -> Result<(Self, bool), ProofError> {
        let first = *encoded.first().ok_or(ProofError::InvalidNode("empty path"))?;
        let flags = first >> 4;
        if flags > 3 {
            return Err(ProofError::InvalidNode("bad hex-prefix flag"));
        }
        let is_leaf = flags >= 2;
        let odd = flags % 2 == 1;
        if !odd && first & 0x0F != 0 {
            return Err(ProofError::InvalidNode("bad hex-prefix padding"));
        }

        let mut nibbles = Vec::with_capacity(encoded.len() * 2);
        if odd {
            nibbles.push(first & 0x0F);
        }
        for &byte in &encoded[1..] {
            nibbles.push(byte >> 4);
            nibbles.push(byte & 0x0F);
        }
        Ok((Nibbles(nibbles), is_leaf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_nibbles_from_bytes() {
        let nibbles = Nibbles::from_bytes(&[0xAB, 0x0F]);
        assert_eq!(nibbles.0, vec![0x0A, 0x0B, 0x00, 0x0F]);
        assert_eq!(nibbles.at(1), Some(0x0B));
        assert_eq!(nibbles.at(4), None);
        assert!(nibbles.slice(9).is_empty());
    }

    #[test]
    fn test_hex_prefix_flags() {
        assert_eq!(Nibbles(vec![1, 2, 3, 4]).encode_hex_prefix(true), vec![0x20, 0x12, 0x34]);
        assert_eq!(Nibbles(vec![1, 2, 3]).encode_hex_prefix(true), vec![0x31, 0x23]);
        assert_eq!(Nibbles(vec![1, 2]).encode_hex_prefix(false), vec![0x00, 0x12]);
        assert_eq!(Nibbles(vec![0xf]).encode_hex_prefix(false), vec![0x1f]);
    }

    #[test]
    fn test_invalid_prefixes_rejected() {
        assert!(Nibbles::decode_hex_prefix(&[]).is_err());
        assert!(Nibbles::decode_hex_prefix(&[0x40]).is_err());
        assert!(Nibbles::decode_hex_prefix(&[0x21, 0x12]).is_err());
    }

    proptest! {
        #[test]
        fn prop_hex_prefix_decodes_what_it_encodes(
            path in proptest::collection::vec(0u8..16, 0..64),
            is_leaf in any::<bool>(),
        ) {
            let nibbles = Nibbles(path);
            let (decoded, leaf) = Nibbles::decode_hex_prefix(&nibbles.encode_hex_prefix(is_leaf)).unwrap();
            prop_assert_eq!(decoded, nibbles);
            prop_assert_eq!(leaf, is_leaf);
        }
    }
}
