//! Embassy async tasks
//!
//! Reader tasks feed the static channels; the node loop in each binary
//! consumes them.

pub mod bus_rx;
pub mod keys;
pub mod speed;

pub use bus_rx::bus_rx_task;
pub use keys::key_reader_task;
pub use speed::{speed_dial_task, DialLevel};
