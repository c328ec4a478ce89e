//! Match state and render snapshots
//!
//! The master owns the single authoritative [`MatchState`]; displays are
//! fed consistent [`MatchSnapshot`] copies through a dirty-checking
//! [`RedrawTracker`].

pub mod court;
pub mod snapshot;

pub use court::{Ball, MatchState, Paddles, Score, Service, Vector};
pub use snapshot::{MatchSnapshot, RedrawTracker};
