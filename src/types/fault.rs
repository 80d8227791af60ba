//! Harmonic fault types: FaultType, Confidence, HarmonicSet, FaultVerdict

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Machine fault category inferred from the 1x/2x/3x harmonic pattern
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FaultType {
    /// All harmonic amplitudes negligible
    NoFaultCondition,
    /// Dominant 1x, decreasing pattern
    Unbalance,
    /// Dominant 1x with a small 3x
    BentRotor,
    /// Decreasing pattern with a significant 3x
    AngularMisalignment,
    /// Dominant 2x, 1x at least as large as 3x
    ParallelMisalignment,
    /// Dominant 2x
    Misalignment,
    /// Dominant 3x
    ExtremeLooseness,
    /// No known signature matched
    Normal,
}

impl FaultType {
    /// Every category, in rule precedence order
    pub const ALL: [FaultType; 8] = [
        FaultType::NoFaultCondition,
        FaultType::Unbalance,
        FaultType::BentRotor,
        FaultType::AngularMisalignment,
        FaultType::ParallelMisalignment,
        FaultType::Misalignment,
        FaultType::ExtremeLooseness,
        FaultType::Normal,
    ];

    /// Human-readable label shown next to the verdict
    pub fn label(&self) -> &'static str {
        match self {
            FaultType::NoFaultCondition => "No Fault Condition",
            FaultType::Unbalance => "Unbalance",
            FaultType::BentRotor => "Bent Rotor",
            FaultType::AngularMisalignment => "Angular Misalignment",
            FaultType::ParallelMisalignment => "Parallel Misalignment",
            FaultType::Misalignment => "Misalignment",
            FaultType::ExtremeLooseness => "Extreme Looseness",
            FaultType::Normal => "Normal",
        }
    }

    /// Fixed diagnostic explanation for the category
    pub fn description(&self) -> &'static str {
        match self {
            FaultType::NoFaultCondition => {
                "All harmonic amplitudes are very low, indicating normal operating condition with minimal vibration."
            }
            FaultType::Unbalance => {
                "Decreasing harmonic pattern with dominant 1x vibration indicates static or dynamic unbalance."
            }
            FaultType::BentRotor => {
                "Dominant 1x vibration with low 3x harmonic suggests a bent rotor shaft."
            }
            FaultType::AngularMisalignment => {
                "Decreasing harmonic pattern with significant 3x component indicates angular misalignment."
            }
            FaultType::ParallelMisalignment => {
                "Dominant 2x vibration indicates parallel misalignment between coupled shafts."
            }
            FaultType::Misalignment => {
                "Dominant 2x vibration pattern suggests general misalignment condition."
            }
            FaultType::ExtremeLooseness => {
                "Dominant 3x vibration indicates extreme looseness in mechanical connections."
            }
            FaultType::Normal => {
                "Vibration pattern appears normal or does not match common fault signatures."
            }
        }
    }
}

impl std::fmt::Display for FaultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Confidence attached to a fault verdict
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Confidence {
    #[default]
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::Low => write!(f, "Low"),
            Confidence::Medium => write!(f, "Medium"),
            Confidence::High => write!(f, "High"),
        }
    }
}

/// Expected bin locations of the 1x/2x/3x rotational harmonics.
///
/// Bin index ≈ Hz, so `o1` is the shaft frequency in whole Hz.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct HarmonicSet {
    pub o1: usize,
    pub o2: usize,
    pub o3: usize,
}

impl HarmonicSet {
    pub fn orders(&self) -> [usize; 3] {
        [self.o1, self.o2, self.o3]
    }
}

/// Peak spectrum amplitude found around each harmonic
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct HarmonicAmplitudes {
    pub v1_max: f64,
    pub v2_max: f64,
    pub v3_max: f64,
}

/// One spectrum bin ranked by magnitude
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SpectralPeak {
    /// Bin index (≈ Hz)
    pub bin: usize,
    pub magnitude: f64,
}

/// Result of one harmonic fault classification.
///
/// Built fresh per call; amplitudes are rounded to the configured precision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FaultVerdict {
    pub fault_type: FaultType,
    pub confidence: Confidence,
    pub description: String,
    pub rpm: f64,
    pub harmonics: HarmonicSet,
    pub amplitudes: HarmonicAmplitudes,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_fault_has_text() {
        for fault in FaultType::ALL {
            assert!(!fault.label().is_empty());
            assert!(fault.description().ends_with('.'));
        }
    }

    #[test]
    fn test_confidence_ordering() {
        assert!(Confidence::Low < Confidence::Medium);
        assert!(Confidence::Medium < Confidence::High);
        assert_eq!(Confidence::default(), Confidence::Low);
    }

    #[test]
    fn test_verdict_serializes_camel_case() {
        let verdict = FaultVerdict {
            fault_type: FaultType::Unbalance,
            confidence: Confidence::High,
            description: FaultType::Unbalance.description().to_string(),
            rpm: 1800.0,
            harmonics: HarmonicSet { o1: 30, o2: 60, o3: 90 },
            amplitudes: HarmonicAmplitudes { v1_max: 5.0, v2_max: 1.0, v3_max: 0.2 },
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
        };
        let json = serde_json::to_value(&verdict).expect("verdict serializes");
        assert_eq!(json["faultType"], "Unbalance");
        assert_eq!(json["confidence"], "High");
        assert_eq!(json["harmonics"]["o2"], 60);
        assert_eq!(json["amplitudes"]["v3_max"], 0.2);
    }
}
