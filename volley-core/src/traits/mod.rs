//! Hardware boundary traits
//!
//! These traits define the interface between the match logic and
//! hardware-specific implementations: the bus transmit mailbox, the
//! terminal display, and the master's speed dial.

pub mod bus;
pub mod display;
pub mod sensor;

pub use bus::{BusTx, TransportError};
pub use display::{Display, DisplayError};
pub use sensor::SpeedSensor;
