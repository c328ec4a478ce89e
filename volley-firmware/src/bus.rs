//! CAN bus plumbing shared by the node binaries.
//!
//! Addressing lives entirely in the identifier layout: every node
//! transmits at will and the acceptance filter bank decides what each
//! node hears. Transmission is fire and forget; a frame that finds all
//! three mailboxes full is dropped and the per-tick ball broadcast
//! covers the gap.

use embassy_stm32::can::filter::Mask32;
use embassy_stm32::can::{Can, CanTx, Fifo, Frame, StandardId};

use volley_core::traits::{BusTx, TransportError};
use volley_protocol::{AcceptanceFilter, WireFrame, MAX_STANDARD_ID};

/// Bus bitrate shared by every node
pub const BITRATE: u32 = 250_000;

/// Program the bitrate and this node's acceptance filter
pub fn configure(can: &mut Can<'_>, filter: AcceptanceFilter) {
    let id = StandardId::new(filter.filter() & MAX_STANDARD_ID).unwrap_or(StandardId::ZERO);
    let mask = StandardId::new(filter.mask() & MAX_STANDARD_ID).unwrap_or(StandardId::ZERO);
    can.modify_filters()
        .enable_bank(0, Fifo::Fifo0, Mask32::frames_with_std_id(id, mask));
    can.modify_config().set_bitrate(BITRATE);
}

/// Transmit half of the bus
pub struct CanBus<'d> {
    tx: CanTx<'d>,
}

impl<'d> CanBus<'d> {
    pub fn new(tx: CanTx<'d>) -> Self {
        Self { tx }
    }
}

impl BusTx for CanBus<'_> {
    fn send(&mut self, frame: &WireFrame) -> Result<(), TransportError> {
        // Identifier and payload are bounds checked at codec level
        let Ok(can_frame) = Frame::new_standard(frame.raw_id, frame.data()) else {
            return Ok(());
        };
        self.tx
            .try_write(&can_frame)
            .map(|_| ())
            .map_err(|_| TransportError::Busy)
    }
}
