//! Session economy: player state, draw rules, cashout and life regeneration.

pub mod logic;
pub mod offline;
pub mod regen;
pub mod state;

pub use logic::*;
pub use offline::*;
pub use regen::*;
pub use state::*;
