//! Inter-task communication channels
//!
//! Static embassy-sync primitives connecting the reader tasks to the
//! node loop in each binary. Readers never block: when a queue is full
//! the frame or key is dropped and the loop catches up later.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use volley_core::pacing::SpeedLevel;
use volley_protocol::{KeyCommand, Message};

/// Channel capacity for decoded bus frames
const BUS_CHANNEL_SIZE: usize = 16;

/// Channel capacity for terminal keystrokes
const KEY_CHANNEL_SIZE: usize = 8;

/// Decoded frames from the CAN receiver
pub static BUS_EVENTS: Channel<CriticalSectionRawMutex, Message, BUS_CHANNEL_SIZE> = Channel::new();

/// Key commands typed at the local terminal
pub static KEY_EVENTS: Channel<CriticalSectionRawMutex, KeyCommand, KEY_CHANNEL_SIZE> =
    Channel::new();

/// Latest speed dial level (master only)
pub static SPEED_LEVEL: Signal<CriticalSectionRawMutex, SpeedLevel> = Signal::new();
