//! Slave node: one paddle, a mirrored court, a bell.
//!
//! Owns nothing but its paddle row. Everything else on screen is a
//! mirror of what the master broadcasts; lost event frames stay lost,
//! a stale ball heals on the next broadcast.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_stm32::bind_interrupts;
use embassy_stm32::can::{
    Can, Rx0InterruptHandler, Rx1InterruptHandler, SceInterruptHandler, TxInterruptHandler,
};
use embassy_stm32::gpio::{Input, Pull};
use embassy_stm32::peripherals::{CAN, USART2};
use embassy_stm32::usart::{self, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use volley_core::slave::{Effect, SlaveConfig, SlaveController};
use volley_core::traits::{BusTx, Display};
use volley_firmware::bus::{self, CanBus};
use volley_firmware::channels::{BUS_EVENTS, KEY_EVENTS};
use volley_firmware::tasks;
use volley_firmware::vt100::Vt100;
use volley_protocol::{AcceptanceFilter, Side};

bind_interrupts!(struct Irqs {
    CEC_CAN => Rx0InterruptHandler<CAN>, Rx1InterruptHandler<CAN>, SceInterruptHandler<CAN>, TxInterruptHandler<CAN>;
    USART2 => usart::InterruptHandler<USART2>;
});

static CAN_CELL: StaticCell<Can<'static>> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("volley slave starting");

    let p = embassy_stm32::init(Default::default());

    // Straps select the role: PA0 low plays left, open plays right;
    // PB1 low makes this node the scoreboard
    let side_strap = Input::new(p.PA0, Pull::Up);
    let scoreboard_strap = Input::new(p.PB1, Pull::Up);
    let config = SlaveConfig {
        side: if side_strap.is_low() {
            Side::Left
        } else {
            Side::Right
        },
        scoreboard: scoreboard_strap.is_low(),
    };
    info!("playing {}, scoreboard={}", config.side, config.scoreboard);

    // CAN on PA11/PA12; slaves hear the even identifiers only
    let can = CAN_CELL.init(Can::new(p.CAN, p.PA11, p.PA12, Irqs));
    bus::configure(can, AcceptanceFilter::even_only());
    can.enable().await;
    let (can_tx, can_rx) = can.split();
    let mut bus = CanBus::new(can_tx);

    // Terminal on USART2 (PA2 TX / PA3 RX), keys in, court out
    let mut uart_config = usart::Config::default();
    uart_config.baudrate = 115200;
    let uart = Uart::new(
        p.USART2,
        p.PA3,
        p.PA2,
        Irqs,
        p.DMA1_CH4,
        p.DMA1_CH5,
        uart_config,
    )
    .unwrap();
    let (uart_tx, uart_rx) = uart.split();
    let mut terminal = Vt100::new(uart_tx);

    spawner
        .spawn(tasks::bus_rx_task(can_rx, AcceptanceFilter::even_only()))
        .unwrap();
    spawner.spawn(tasks::key_reader_task(uart_rx)).unwrap();

    let mut controller = SlaveController::new(config);
    if terminal.draw_court(&controller.snapshot()).is_err() {
        warn!("terminal write failed");
    }

    info!("mirror loop running");
    loop {
        let effect = match select(BUS_EVENTS.receive(), KEY_EVENTS.receive()).await {
            Either::First(msg) => controller.handle_message(msg),
            Either::Second(key) => controller.handle_key(key),
        };

        match effect {
            Some(Effect::Transmit(msg)) => {
                if bus.send(&msg.to_wire()).is_err() {
                    warn!("bus busy, frame dropped");
                }
            }
            Some(Effect::Bell) => {
                terminal.bell().ok();
            }
            None => {}
        }
        if let Some(snapshot) = controller.take_redraw() {
            terminal.render(&snapshot).ok();
        }
    }
}
