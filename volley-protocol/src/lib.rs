//! Match-Bus Protocol
//!
//! This crate defines the broadcast-bus protocol between the master node
//! (which simulates the rally) and the two slave nodes (which own their
//! paddles and mirror everything else). Frames are small and fixed
//! format: an 11-bit identifier plus up to four 16-bit payload words.
//!
//! # Identifier map
//!
//! ```text
//! ┌───────┬────────────────────────┬───────┬─────────┐
//! │ Ident │ Meaning                │ Words │ Profile │
//! ├───────┼────────────────────────┼───────┼─────────┤
//! │ 0x00  │ Ball position (x, y)   │ 2     │ word    │
//! │ 0x02  │ Bounce                 │ 0     │ -       │
//! │ 0x04  │ Point (winner)         │ 1     │ byte    │
//! │ 0x0A  │ Paddle Left (y)        │ 1     │ byte    │
//! │ 0x0B  │ Service Left           │ 0     │ -       │
//! │ 0x14  │ Paddle Right (y)       │ 1     │ byte    │
//! │ 0x15  │ Service Right          │ 0     │ -       │
//! └───────┴────────────────────────┴───────┴─────────┘
//! ```
//!
//! Mirrored identifiers are even, serve requests odd, so slaves filter
//! on the low identifier bit and never see serve traffic. There are no
//! delivery guarantees: the ball re-broadcast every tick heals a lost
//! `Ball` frame, while a lost `Bounce` or `Point` stays lost.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod ident;
pub mod keys;
pub mod messages;

pub use frame::{CodecError, Frame, Profile, WireFrame, MAX_DATA, MAX_WORDS};
pub use ident::{AcceptanceFilter, Ident, Side, MAX_STANDARD_ID};
pub use keys::KeyCommand;
pub use messages::Message;
