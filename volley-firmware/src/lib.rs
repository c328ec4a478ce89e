//! Shared firmware modules for the Volley nodes.
//!
//! Both binaries run on the same STM32F072 board layout: bxCAN on
//! PA11/PA12, a VT100-capable serial terminal on USART2, and for the
//! master a speed dial on PA1. The binaries differ only in which tasks
//! they spawn and which half of the identifier space they accept.

#![no_std]

pub mod bus;
pub mod channels;
pub mod tasks;
pub mod vt100;
