pub mod entities;
pub mod errors;
pub mod nibbles;
pub mod node;
pub mod verify;

pub use entities::*;
pub use errors::*;
pub use nibbles::*;
pub use node::*;
pub use verify::*;
