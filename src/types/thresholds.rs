//! ISO 10816 severity thresholds and harmonic fault-rule constants

use serde::{Deserialize, Serialize};

/// Constants for the harmonic-order fault rules
pub mod harmonic_thresholds {
    /// Half-width of the bin window searched around each harmonic (bins ≈ Hz)
    pub const WINDOW_RADIUS: usize = 5;
    /// All three harmonic amplitudes below this mean no fault
    pub const NO_FAULT_FLOOR: f64 = 0.1;
    /// 3x amplitude boundary separating bent rotor from angular misalignment
    pub const THIRD_HARMONIC_FLOOR: f64 = 0.5;
    /// Decimal places kept on reported amplitudes
    pub const AMPLITUDE_DECIMALS: u32 = 5;
    /// Strongest spectrum bins listed alongside a verdict
    pub const DOMINANT_PEAK_COUNT: usize = 3;
}

/// Constants for peak amplitude extraction
pub mod severity_thresholds {
    /// Samples scanned per channel when extracting a peak
    pub const SAMPLE_LIMIT: usize = 1000;
}

/// ISO 10816 velocity thresholds for one machine class (mm/s).
///
/// Each value is the inclusive upper bound of its tier: an amplitude equal
/// to `good` is still Good. Anything above `unsatisfactory` is Unacceptable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassThresholds {
    pub good: f64,
    pub satisfactory: f64,
    pub unsatisfactory: f64,
}

impl ClassThresholds {
    pub const fn new(good: f64, satisfactory: f64, unsatisfactory: f64) -> Self {
        Self {
            good,
            satisfactory,
            unsatisfactory,
        }
    }

    /// Whether the triple is finite, positive and strictly increasing
    pub fn is_well_ordered(&self) -> bool {
        [self.good, self.satisfactory, self.unsatisfactory]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
            && self.good < self.satisfactory
            && self.satisfactory < self.unsatisfactory
    }
}

/// Class I - small machines
pub const CLASS_I: ClassThresholds = ClassThresholds::new(1.12, 2.80, 7.10);
/// Class II - medium machines
pub const CLASS_II: ClassThresholds = ClassThresholds::new(1.80, 4.50, 11.2);
/// Class III - large machines on rigid foundations
pub const CLASS_III: ClassThresholds = ClassThresholds::new(2.80, 7.10, 18.0);
/// Class IV - large machines on soft foundations
pub const CLASS_IV: ClassThresholds = ClassThresholds::new(4.50, 11.2, 28.0);
