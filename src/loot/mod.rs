//! Loot table evaluator: outcome types, name pools, tables and the weighted draw.

pub mod draw;
pub mod names;
pub mod random;
pub mod tables;
pub mod types;

pub use draw::*;
pub use names::*;
pub use random::*;
pub use tables::*;
pub use types::*;
