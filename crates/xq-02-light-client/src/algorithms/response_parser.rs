//! # Compute Job Response Parsing
//!
//! The push-compute job answers with a compact text payload:
//!
//! ```text
//! <n>,<chainId>,<height>,<rootDecimal>[,<chainId>,<height>,<rootDecimal>]...
//! ```
//!
//! Roots are big-endian 256-bit integers written in decimal. The job
//! terminates every field with a comma and may deliver the whole string as
//! a quoted JSON string; both forms are accepted.

use crate::domain::LightClientError;
use shared_types::{be_word, OracleResponse, H256, U256};

/// Parse a compute job payload into oracle responses.
pub fn parse_compute_response(payload: &str) -> Result<Vec<OracleResponse>, LightClientError> {
    let body = unquote(payload.trim());
    let body = body.strip_suffix(',').unwrap_or(body);
    let fields: Vec<&str> = body.split(',').map(str::trim).collect();
    let (count_field, rest) = fields
        .split_first()
        .ok_or_else(|| malformed("empty payload"))?;
    let count: usize = count_field
        .parse()
        .map_err(|_| malformed("invalid response count"))?;
    if count == 0 {
        return Err(LightClientError::EmptyResponse);
    }
    if count.checked_mul(3) != Some(rest.len()) {
        return Err(malformed("field count does not match response count"));
    }

    rest.chunks(3)
        .map(|chunk| {
            let dst_chain_id = chunk[0]
                .parse()
                .map_err(|_| malformed("invalid chain id"))?;
            let height = U256::from_dec_str(chunk[1]).map_err(|_| malformed("invalid height"))?;
            let root = U256::from_dec_str(chunk[2]).map_err(|_| malformed("invalid root"))?;
            Ok(OracleResponse {
                dst_chain_id,
                height,
                root: H256(be_word(root)),
            })
        })
        .collect()
}

/// Render responses in the compute job format.
pub fn encode_compute_response(responses: &[OracleResponse]) -> String {
    let mut fields = vec![responses.len().to_string()];
    for response in responses {
        fields.push(response.dst_chain_id.to_string());
        fields.push(response.height.to_string());
        fields.push(U256::from_big_endian(response.root.as_bytes()).to_string());
    }
    fields.join(",")
}

fn unquote(payload: &str) -> &str {
    payload
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(payload)
}

fn malformed(reason: &str) -> LightClientError {
    LightClientError::MalformedResponse(reason.to_string())
}
