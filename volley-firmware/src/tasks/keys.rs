//! Terminal keystroke reader
//!
//! Feeds one-byte key commands from the serial console to the node
//! loop. Bytes outside the key map are dropped silently.

use defmt::*;
use embassy_stm32::mode::Async;
use embassy_stm32::usart::UartRx;
use embassy_time::Timer;

use volley_protocol::KeyCommand;

use crate::channels::KEY_EVENTS;

/// Reads raw bytes and queues the recognized key commands
#[embassy_executor::task]
pub async fn key_reader_task(mut rx: UartRx<'static, Async>) {
    info!("key reader started");

    let mut buf = [0u8; 1];
    loop {
        match rx.read(&mut buf).await {
            Ok(()) => {
                let Some(key) = KeyCommand::from_byte(buf[0]) else {
                    continue;
                };
                if KEY_EVENTS.try_send(key).is_err() {
                    warn!("key channel full, dropping key");
                }
            }
            Err(e) => {
                warn!("uart read error: {:?}", e);
                Timer::after_millis(10).await;
            }
        }
    }
}
