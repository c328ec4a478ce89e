//! Slave-node mirror and input handling
//!
//! Slaves never simulate. They apply bus frames to a local mirror,
//! announce their own paddle moves, and leave every game decision to
//! the master.

pub mod controller;

pub use controller::{Effect, SlaveConfig, SlaveController};
