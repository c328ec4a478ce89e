//! Speed dial boundary

use crate::pacing::SpeedLevel;

/// The master's analog speed dial.
///
/// Reads never fail: a sensor that cannot produce a fresh sample
/// reports its last known level.
pub trait SpeedSensor {
    /// Latest speed level
    fn level(&mut self) -> SpeedLevel;
}
