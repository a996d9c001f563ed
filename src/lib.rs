//! NFTuklas - Weighted-Draw Prospecting Engine
//!
//! This module exposes the loot evaluator, session economy and persistence
//! bridge for the shell, the simulator and tests.

pub mod build_info;
pub mod core;
pub mod economy;
pub mod error;
pub mod loot;
pub mod persistence;
pub mod session;
pub mod shell;
pub mod simulator;

pub use session::{Session, SessionSnapshot, SessionTick};
