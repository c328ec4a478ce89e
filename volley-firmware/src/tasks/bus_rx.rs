//! CAN receive task
//!
//! Decodes frames off the bus and queues them for the node loop. The
//! hardware bank already enforces the acceptance filter; the software
//! check keeps loopback and bench configurations honest.

use defmt::*;
use embassy_stm32::can::CanRx;
use embassy_time::Timer;
use embedded_can::Id;

use volley_protocol::{AcceptanceFilter, Message, WireFrame};

use crate::channels::BUS_EVENTS;

/// Receives, filters and decodes bus frames
#[embassy_executor::task]
pub async fn bus_rx_task(mut rx: CanRx<'static>, filter: AcceptanceFilter) {
    info!("bus rx task started");

    loop {
        match rx.read().await {
            Ok(envelope) => {
                let raw_id = match envelope.frame.header().id() {
                    Id::Standard(id) => id.as_raw(),
                    Id::Extended(_) => continue,
                };
                if !filter.accepts(raw_id) {
                    continue;
                }
                let Ok(wire) = WireFrame::new(raw_id, envelope.frame.data()) else {
                    continue;
                };
                match Message::from_wire(&wire) {
                    Ok(msg) => {
                        if BUS_EVENTS.try_send(msg).is_err() {
                            warn!("bus channel full, dropping frame");
                        }
                    }
                    Err(e) => warn!("undecodable frame id={:x}: {:?}", raw_id, e),
                }
            }
            Err(e) => {
                warn!("CAN receive error: {:?}", e);
                Timer::after_millis(10).await;
            }
        }
    }
}
