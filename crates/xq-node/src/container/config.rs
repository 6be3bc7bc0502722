//! # Node Configuration
//!
//! Unified configuration for the gateway, both light clients and runtime
//! parameters.
//!
//! ## Sources (later wins)
//!
//! 1. Defaults
//! 2. JSON file named by `XQ_CONFIG`
//! 3. `XQ_PROTOCOL_FEE`, `XQ_GAS_PRICE`, `XQ_LOG_LEVEL`, `XQ_RELAYERS`

use serde::{Deserialize, Serialize};
use shared_types::{Address, U256};
use std::path::{Path, PathBuf};
use thiserror::Error;
use xq_02_light_client::{NodeOperatorConfig, PushComputeConfig};
use xq_03_query_gateway::GatewayConfig;

/// Complete node configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Query gateway configuration.
    pub gateway: GatewayConfig,
    /// Push-compute light client configuration.
    pub push_compute: PushComputeConfig,
    /// Node-operator light client configuration.
    pub node_operator: NodeOperatorConfig,
    /// Principals of the wired services.
    pub principals: PrincipalsConfig,
    /// Runtime parameters.
    pub runtime: RuntimeConfig,
    /// Relayers admitted at startup.
    pub relayers: Vec<Address>,
}

/// Principals of the wired services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalsConfig {
    /// Push-compute light client.
    pub push_compute: Address,
    /// Push-compute job principal.
    pub push_compute_oracle: Address,
    /// Node-operator light client.
    pub node_operator: Address,
    /// Node-operator network principal.
    pub node_operator_oracle: Address,
    /// Default in-memory receiver.
    pub receiver: Address,
}

impl Default for PrincipalsConfig {
    fn default() -> Self {
        Self {
            push_compute: Address::from_low_u64_be(0x1c01),
            push_compute_oracle: Address::from_low_u64_be(0x0c01),
            node_operator: Address::from_low_u64_be(0x1c02),
            node_operator_oracle: Address::from_low_u64_be(0x0c02),
            receiver: Address::from_low_u64_be(0xcb),
        }
    }
}

/// Runtime parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Initial gas price of the manual feed.
    pub gas_price: U256,
    /// Log filter directive.
    pub log_level: String,
    /// Event bus buffer per subscriber.
    pub event_bus_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            gas_price: U256::from(1_000_000_000u64), // 1 gwei
            log_level: "info".to_string(),
            event_bus_capacity: shared_bus::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Cannot read config file {path:?}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Cause
        source: std::io::Error,
    },

    /// The config file is not valid JSON for [`NodeConfig`].
    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),

    /// A numeric override is not a decimal integer.
    #[error("{var} must be a decimal integer, got {value:?}")]
    InvalidNumber {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
    },

    /// An address override is not 20 hex-encoded bytes.
    #[error("Invalid address {value:?} in XQ_RELAYERS")]
    InvalidAddress {
        /// Raw value
        value: String,
    },
}

impl NodeConfig {
    /// Load from `XQ_CONFIG` (if set) and apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("XQ_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Parse a JSON config file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Apply `XQ_*` overrides read through `lookup`.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup("XQ_PROTOCOL_FEE") {
            self.gateway.protocol_fee = parse_amount("XQ_PROTOCOL_FEE", &value)?;
        }
        if let Some(value) = lookup("XQ_GAS_PRICE") {
            self.runtime.gas_price = parse_amount("XQ_GAS_PRICE", &value)?;
        }
        if let Some(value) = lookup("XQ_LOG_LEVEL") {
            self.runtime.log_level = value;
        }
        if let Some(value) = lookup("XQ_RELAYERS") {
            self.relayers = value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(parse_address)
                .collect::<Result<_, _>>()?;
        }
        Ok(())
    }
}

fn parse_amount(var: &'static str, value: &str) -> Result<U256, ConfigError> {
    U256::from_dec_str(value.trim()).map_err(|_| ConfigError::InvalidNumber {
        var,
        value: value.to_string(),
    })
}

fn parse_address(value: &str) -> Result<Address, ConfigError> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    match hex::decode(digits) {
        Ok(bytes) if bytes.len() == 20 => Ok(Address::from_slice(&bytes)),
        _ => Err(ConfigError::InvalidAddress {
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_overrides() {
        let mut config = NodeConfig::default();
        config
            .apply_overrides(env(&[
                ("XQ_PROTOCOL_FEE", "42"),
                ("XQ_GAS_PRICE", "7"),
                ("XQ_LOG_LEVEL", "debug"),
                (
                    "XQ_RELAYERS",
                    "0x00000000000000000000000000000000000000aa, 00000000000000000000000000000000000000bb",
                ),
            ]))
            .unwrap();

        assert_eq!(config.gateway.protocol_fee, U256::from(42));
        assert_eq!(config.runtime.gas_price, U256::from(7));
        assert_eq!(config.runtime.log_level, "debug");
        assert_eq!(
            config.relayers,
            vec![Address::from_low_u64_be(0xaa), Address::from_low_u64_be(0xbb)]
        );
    }

    #[test]
    fn test_bad_overrides() {
        let mut config = NodeConfig::default();
        assert!(matches!(
            config.apply_overrides(env(&[("XQ_GAS_PRICE", "cheap")])),
            Err(ConfigError::InvalidNumber { var: "XQ_GAS_PRICE", .. })
        ));
        assert!(matches!(
            config.apply_overrides(env(&[("XQ_RELAYERS", "0x1234")])),
            Err(ConfigError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"runtime": {{"gas_price": "0x10", "log_level": "warn", "event_bus_capacity": 8}}}}"#).unwrap();

        let config = NodeConfig::from_file(file.path()).unwrap();
        assert_eq!(config.runtime.gas_price, U256::from(16));
        assert_eq!(config.runtime.event_bus_capacity, 8);
        assert_eq!(config.gateway, GatewayConfig::default());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            NodeConfig::from_file(Path::new("/nonexistent/xq.json")),
            Err(ConfigError::Io { .. })
        ));
    }
}
