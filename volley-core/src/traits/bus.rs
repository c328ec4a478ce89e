//! Bus transmit boundary

use volley_protocol::WireFrame;

/// Errors a bus transmitter can report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// A previous transmission still owns the mailbox
    Busy,
}

/// One transmit mailbox onto the broadcast bus.
///
/// `send` may block briefly while the previous frame drains, but the
/// wait is bounded: implementations return [`TransportError::Busy`]
/// instead of spinning forever on a wedged mailbox.
pub trait BusTx {
    /// Queue one frame for transmission
    fn send(&mut self, frame: &WireFrame) -> Result<(), TransportError>;
}
