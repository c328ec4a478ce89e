//! Master node: owns the rally and broadcasts the court.
//!
//! Runs the tick engine at the dial-selected cadence, consumes paddle
//! and serve frames from the slaves, and mirrors the match on its own
//! serial terminal.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::adc::{self, Adc, SampleTime};
use embassy_stm32::bind_interrupts;
use embassy_stm32::can::{
    Can, Rx0InterruptHandler, Rx1InterruptHandler, SceInterruptHandler, TxInterruptHandler,
};
use embassy_stm32::peripherals::{ADC1, CAN, USART2};
use embassy_stm32::usart::{self, Uart};
use embassy_time::Timer;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use volley_core::master::{Engine, TickEvent};
use volley_core::pacing;
use volley_core::state::{MatchSnapshot, RedrawTracker};
use volley_core::traits::{Display, SpeedSensor};
use volley_firmware::bus::{self, CanBus};
use volley_firmware::channels::BUS_EVENTS;
use volley_firmware::tasks::{self, DialLevel};
use volley_firmware::vt100::Vt100;
use volley_protocol::AcceptanceFilter;

bind_interrupts!(struct Irqs {
    CEC_CAN => Rx0InterruptHandler<CAN>, Rx1InterruptHandler<CAN>, SceInterruptHandler<CAN>, TxInterruptHandler<CAN>;
    USART2 => usart::InterruptHandler<USART2>;
    ADC1_COMP => adc::InterruptHandler<ADC1>;
});

static CAN_CELL: StaticCell<Can<'static>> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("volley master starting");

    let p = embassy_stm32::init(Default::default());

    // CAN on PA11/PA12; the master listens to the whole identifier space
    let can = CAN_CELL.init(Can::new(p.CAN, p.PA11, p.PA12, Irqs));
    bus::configure(can, AcceptanceFilter::all());
    can.enable().await;
    let (can_tx, can_rx) = can.split();
    let mut bus = CanBus::new(can_tx);

    // Terminal on USART2 (PA2 TX / PA3 RX)
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
    let (uart_tx, _uart_rx) = uart.split();
    let mut terminal = Vt100::new(uart_tx);

    // Speed dial on PA1; the boot sample doubles as the serve seed
    let mut adc = Adc::new(p.ADC1, Irqs);
    let mut dial = p.PA1;
    let boot_sample = adc.read(&mut dial, SampleTime::CYCLES239_5).await;
    let mut engine = Engine::new(u32::from(boot_sample));

    spawner
        .spawn(tasks::bus_rx_task(can_rx, AcceptanceFilter::all()))
        .unwrap();
    spawner.spawn(tasks::speed_dial_task(adc, dial)).unwrap();

    let mut tracker = RedrawTracker::new(MatchSnapshot::of(engine.state()));
    if terminal.draw_court(&MatchSnapshot::of(engine.state())).is_err() {
        warn!("terminal write failed");
    }
    let mut speed = DialLevel::new();

    info!("rally loop running");
    loop {
        while let Ok(msg) = BUS_EVENTS.try_receive() {
            engine.handle_message(msg);
        }

        match engine.tick_and_broadcast(&mut bus) {
            Ok(outcome) => {
                if outcome.event == Some(TickEvent::Bounce) {
                    terminal.bell().ok();
                }
            }
            Err(_) => warn!("bus busy, frames lost this tick"),
        }
        if let Some(snapshot) = tracker.take(MatchSnapshot::of(engine.state())) {
            terminal.render(&snapshot).ok();
        }

        Timer::after_millis(u64::from(pacing::tick_delay_ms(speed.level()))).await;
    }
}
