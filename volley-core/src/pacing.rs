//! Tick pacing from the speed dial.
//!
//! The master samples an analog speed dial and maps it to one of five
//! levels. Each level shaves a fixed slice off the base tick delay, so
//! level 0 plays at 500 ms per tick and level 4 at 100 ms.

/// Full-scale reading of a 10-bit speed dial sample
pub const DIAL_FULL_SCALE: u16 = 1023;

/// Tick delay at speed level 0
pub const BASE_TICK_DELAY_MS: u32 = 500;

/// Delay shaved off per speed level
pub const TICK_DELAY_STEP_MS: u32 = 100;

/// Ball speed level, 0 (slowest) through 4 (fastest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpeedLevel(u8);

impl SpeedLevel {
    /// Highest level
    pub const MAX: u8 = 4;

    /// Level 0
    pub const fn slowest() -> Self {
        Self(0)
    }

    /// Clamp an arbitrary level into range
    pub fn new(level: u8) -> Self {
        Self(level.min(Self::MAX))
    }

    /// Map a raw dial sample to a level.
    ///
    /// `full_scale` is the sensor's maximum reading; pass
    /// [`DIAL_FULL_SCALE`] for a 10-bit dial. A zero full scale reads
    /// as level 0.
    pub fn from_sample(raw: u16, full_scale: u16) -> Self {
        if full_scale == 0 {
            return Self::slowest();
        }
        let raw = raw.min(full_scale);
        let level = u32::from(raw) * u32::from(Self::MAX) / u32::from(full_scale);
        Self::new(level as u8)
    }

    /// The level as a plain number
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for SpeedLevel {
    fn default() -> Self {
        Self::slowest()
    }
}

/// Delay between master ticks at the given speed level
pub fn tick_delay_ms(level: SpeedLevel) -> u32 {
    BASE_TICK_DELAY_MS - TICK_DELAY_STEP_MS * u32::from(level.get())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_mapping_spans_all_levels() {
        assert_eq!(SpeedLevel::from_sample(0, DIAL_FULL_SCALE).get(), 0);
        assert_eq!(SpeedLevel::from_sample(255, DIAL_FULL_SCALE).get(), 0);
        assert_eq!(SpeedLevel::from_sample(256, DIAL_FULL_SCALE).get(), 1);
        assert_eq!(SpeedLevel::from_sample(511, DIAL_FULL_SCALE).get(), 1);
        assert_eq!(SpeedLevel::from_sample(767, DIAL_FULL_SCALE).get(), 2);
        assert_eq!(SpeedLevel::from_sample(1023, DIAL_FULL_SCALE).get(), 4);
    }

    #[test]
    fn test_overrange_sample_clamps() {
        assert_eq!(
            SpeedLevel::from_sample(u16::MAX, DIAL_FULL_SCALE).get(),
            SpeedLevel::MAX
        );
    }

    #[test]
    fn test_zero_full_scale_reads_slowest() {
        assert_eq!(SpeedLevel::from_sample(500, 0), SpeedLevel::slowest());
    }

    #[test]
    fn test_twelve_bit_dial_scales_the_same() {
        assert_eq!(SpeedLevel::from_sample(4095, 4095).get(), 4);
        assert_eq!(SpeedLevel::from_sample(0, 4095).get(), 0);
        assert_eq!(SpeedLevel::from_sample(2047, 4095).get(), 1);
    }

    #[test]
    fn test_level_clamps() {
        assert_eq!(SpeedLevel::new(9).get(), SpeedLevel::MAX);
        assert_eq!(SpeedLevel::new(3).get(), 3);
    }

    #[test]
    fn test_delay_table() {
        assert_eq!(tick_delay_ms(SpeedLevel::new(0)), 500);
        assert_eq!(tick_delay_ms(SpeedLevel::new(1)), 400);
        assert_eq!(tick_delay_ms(SpeedLevel::new(2)), 300);
        assert_eq!(tick_delay_ms(SpeedLevel::new(3)), 200);
        assert_eq!(tick_delay_ms(SpeedLevel::new(4)), 100);
    }
}
