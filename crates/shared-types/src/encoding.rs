//! # Wire Encoding
//!
//! RLP encodings of the protocol entities. The encoded `QueryRequest` is the
//! pre-image of the query id and travels verbatim in submission
//! notifications, so its layout is fixed:
//!
//! ```text
//! [callback, [[dstChainId, to, height, slot], ...], message, lightClient]
//! ```

use crate::entities::{HeightRequest, OracleResponse, QueryRequest, SubQuery};
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};

impl Encodable for SubQuery {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(4);
        s.append(&self.dst_chain_id);
        s.append(&self.to);
        s.append(&self.height);
        s.append(&self.slot);
    }
}

impl Decodable for SubQuery {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if rlp.item_count()? != 4 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        Ok(Self {
            dst_chain_id: rlp.val_at(0)?,
            to: rlp.val_at(1)?,
            height: rlp.val_at(2)?,
            slot: rlp.val_at(3)?,
        })
    }
}

impl Encodable for QueryRequest {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(4);
        s.append(&self.callback);
        s.begin_list(self.queries.len());
        for query in &self.queries {
            s.append(query);
        }
        s.append(&self.message);
        s.append(&self.light_client);
    }
}

impl Decodable for QueryRequest {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if rlp.item_count()? != 4 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        Ok(Self {
            callback: rlp.val_at(0)?,
            queries: list_items(&rlp.at(1)?)?,
            message: rlp.val_at(2)?,
            light_client: rlp.val_at(3)?,
        })
    }
}

impl QueryRequest {
    /// Canonical encoding used for the query id.
    pub fn encode(&self) -> Vec<u8> {
        rlp::encode(self).to_vec()
    }

    /// Decode a stored request.
    pub fn decode_bytes(bytes: &[u8]) -> Result<Self, DecoderError> {
        rlp::decode(bytes)
    }
}

impl Encodable for HeightRequest {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(2);
        s.append(&self.dst_chain_id);
        s.append(&self.height);
    }
}

impl Decodable for HeightRequest {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if rlp.item_count()? != 2 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        Ok(Self {
            dst_chain_id: rlp.val_at(0)?,
            height: rlp.val_at(1)?,
        })
    }
}

impl Encodable for OracleResponse {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(3);
        s.append(&self.dst_chain_id);
        s.append(&self.height);
        s.append(&self.root);
    }
}

impl Decodable for OracleResponse {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if rlp.item_count()? != 3 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        Ok(Self {
            dst_chain_id: rlp.val_at(0)?,
            height: rlp.val_at(1)?,
            root: rlp.val_at(2)?,
        })
    }
}

/// Encode the height requests sent to an oracle.
pub fn encode_height_requests(requests: &[HeightRequest]) -> Vec<u8> {
    let mut s = RlpStream::new_list(requests.len());
    for request in requests {
        s.append(request);
    }
    s.out().to_vec()
}

/// Decode height requests produced by [`encode_height_requests`].
pub fn decode_height_requests(bytes: &[u8]) -> Result<Vec<HeightRequest>, DecoderError> {
    decode_list(bytes)
}

/// Decode `bytes` as exactly one RLP list of `T`.
///
/// Every item must decode and the list must span the whole input.
pub fn decode_list<T: Decodable>(bytes: &[u8]) -> Result<Vec<T>, DecoderError> {
    let rlp = Rlp::new(bytes);
    if !rlp.is_list() {
        return Err(DecoderError::RlpExpectedToBeList);
    }
    if rlp.payload_info()?.total() != bytes.len() {
        return Err(DecoderError::RlpInconsistentLengthAndData);
    }
    list_items(&rlp)
}

/// Decode every item of the list `rlp`, failing on the first bad item.
pub fn list_items<T: Decodable>(rlp: &Rlp) -> Result<Vec<T>, DecoderError> {
    (0..rlp.item_count()?).map(|i| rlp.val_at(i)).collect()
}
