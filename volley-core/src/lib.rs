//! Board-agnostic match logic for the volley pong nodes
//!
//! This crate contains all node logic that does not depend on specific
//! hardware implementations:
//!
//! - Court geometry and match state
//! - Master simulation engine (authoritative ball, score, and serve)
//! - Slave mirror controller (local paddle, everything else mirrored)
//! - Tick pacing from the speed dial
//! - Hardware boundary traits (bus transmit, display, speed sensor)
//!
//! Only the master simulates. Slaves apply whatever the bus tells them
//! and send nothing but their own paddle moves and serve requests, so
//! every node converges on the master's view one tick after a lost
//! ball frame at the latest.

#![no_std]
#![deny(unsafe_code)]

pub mod board;
pub mod master;
pub mod pacing;
pub mod slave;
pub mod state;
pub mod traits;
