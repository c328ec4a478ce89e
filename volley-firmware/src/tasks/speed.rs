//! Speed dial sampling task (master node)
//!
//! Tracks the potentiometer on PA1 and publishes the mapped rally
//! speed whenever the level changes.

use defmt::*;
use embassy_stm32::adc::{Adc, SampleTime};
use embassy_stm32::peripherals::{ADC1, PA1};
use embassy_stm32::Peri;
use embassy_time::{Duration, Ticker};

use volley_core::pacing::SpeedLevel;
use volley_core::traits::SpeedSensor;

use crate::channels::SPEED_LEVEL;

/// Full scale of the F0's 12-bit ADC
pub const ADC_FULL_SCALE: u16 = 4095;

/// Sampling cadence; the dial only needs coarse tracking
const SAMPLE_EVERY_MS: u64 = 250;

/// The node loop's view of the dial: the last signalled level, latched
pub struct DialLevel {
    current: SpeedLevel,
}

impl DialLevel {
    pub const fn new() -> Self {
        Self {
            current: SpeedLevel::slowest(),
        }
    }
}

impl Default for DialLevel {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeedSensor for DialLevel {
    fn level(&mut self) -> SpeedLevel {
        if let Some(level) = SPEED_LEVEL.try_take() {
            self.current = level;
        }
        self.current
    }
}

/// Samples the dial and signals level changes
#[embassy_executor::task]
pub async fn speed_dial_task(mut adc: Adc<'static, ADC1>, mut dial: Peri<'static, PA1>) {
    info!("speed dial task started");

    let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_EVERY_MS));
    let mut current = SpeedLevel::slowest();

    loop {
        ticker.next().await;
        let sample = adc.read(&mut dial, SampleTime::CYCLES239_5).await;
        let level = SpeedLevel::from_sample(sample, ADC_FULL_SCALE);
        if level != current {
            debug!("speed level {} -> {}", current.get(), level.get());
            current = level;
            SPEED_LEVEL.signal(level);
        }
    }
}
