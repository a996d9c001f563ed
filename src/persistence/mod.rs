//! Persistence bridge: key-value stores and the state-to-key mapping.

pub mod bridge;
pub mod store;

pub use bridge::*;
pub use store::*;
