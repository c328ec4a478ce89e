//! Master-node simulation
//!
//! The master is the only node that simulates. It broadcasts the ball
//! every tick (which doubles as loss recovery for the mirrors) and an
//! event frame on the ticks where something happened.

pub mod engine;

pub use engine::{Engine, TickEvent, TickOutcome};
