//! # Application Layer
//!
//! The two light-client backends and the state they share.

pub mod core;
pub mod node_operator;
pub mod push_compute;

pub use self::core::LightClientRoles;
pub use node_operator::NodeOperatorLightClient;
pub use push_compute::PushComputeLightClient;
