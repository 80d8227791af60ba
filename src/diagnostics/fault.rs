//! Harmonic Fault Classifier - machine fault type from 1x/2x/3x amplitudes
//!
//! The shaft speed fixes where the rotational harmonics sit in the FFT
//! spectrum. The peak amplitude around each harmonic forms an ordered
//! triple `(v1, v2, v3)` which is matched against [`FAULT_RULES`] in order;
//! the first match wins. The rules overlap, so table order is the
//! precedence.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::harmonics::{dominant_peaks, harmonic_set, normalize_rpm, round_to, windowed_max};
use crate::config::HarmonicConfig;
use crate::types::{Confidence, FaultType, FaultVerdict, HarmonicAmplitudes, SpectralPeak};

/// One row of the decision table
pub struct FaultRule {
    pub fault: FaultType,
    pub confidence: Confidence,
    pub matches: fn(&HarmonicAmplitudes, &HarmonicConfig) -> bool,
}

/// Ordered decision table. Anything unmatched is [`FaultType::Normal`].
///
/// `AngularMisalignment` requires `v1 > v2 > v3`, which `Unbalance` already
/// claims, so it can never fire. The row is kept so the table matches the
/// field-deployed rule set.
pub const FAULT_RULES: [FaultRule; 7] = [
    FaultRule {
        fault: FaultType::NoFaultCondition,
        confidence: Confidence::High,
        matches: |a, c| {
            a.v1_max < c.no_fault_floor
                && a.v2_max < c.no_fault_floor
                && a.v3_max < c.no_fault_floor
        },
    },
    FaultRule {
        fault: FaultType::Unbalance,
        confidence: Confidence::High,
        matches: |a, _| a.v1_max > a.v2_max && a.v2_max > a.v3_max,
    },
    FaultRule {
        fault: FaultType::BentRotor,
        confidence: Confidence::High,
        matches: |a, c| a.v1_max > a.v2_max && a.v3_max < c.third_harmonic_floor,
    },
    FaultRule {
        fault: FaultType::AngularMisalignment,
        confidence: Confidence::High,
        matches: |a, c| {
            a.v1_max > a.v2_max && a.v2_max > a.v3_max && a.v3_max > c.third_harmonic_floor
        },
    },
    FaultRule {
        fault: FaultType::ParallelMisalignment,
        confidence: Confidence::High,
        matches: |a, _| a.v2_max > a.v1_max && a.v1_max >= a.v3_max,
    },
    FaultRule {
        fault: FaultType::Misalignment,
        confidence: Confidence::High,
        matches: |a, _| a.v2_max > a.v1_max && a.v2_max > a.v3_max,
    },
    FaultRule {
        fault: FaultType::ExtremeLooseness,
        confidence: Confidence::High,
        matches: |a, _| a.v3_max > a.v1_max && a.v3_max > a.v2_max,
    },
];

/// Stateless harmonic fault classifier
#[derive(Debug, Clone, Default)]
pub struct HarmonicFaultClassifier {
    config: HarmonicConfig,
}

impl HarmonicFaultClassifier {
    pub fn new(config: HarmonicConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HarmonicConfig {
        &self.config
    }

    /// Peak amplitude around each harmonic of `rpm`, unrounded.
    pub fn amplitudes(&self, rpm: f64, spectrum: &[f64]) -> HarmonicAmplitudes {
        let h = harmonic_set(rpm);
        let radius = self.config.window_radius;
        HarmonicAmplitudes {
            v1_max: windowed_max(spectrum, h.o1, radius),
            v2_max: windowed_max(spectrum, h.o2, radius),
            v3_max: windowed_max(spectrum, h.o3, radius),
        }
    }

    /// Map an amplitude triple to a fault category and confidence.
    pub fn decide(&self, amplitudes: &HarmonicAmplitudes) -> (FaultType, Confidence) {
        FAULT_RULES
            .iter()
            .find(|rule| (rule.matches)(amplitudes, &self.config))
            .map_or((FaultType::Normal, Confidence::Medium), |rule| {
                (rule.fault, rule.confidence)
            })
    }

    /// Strongest bins of `spectrum`, magnitudes rounded like the verdict.
    pub fn dominant_peaks(&self, spectrum: &[f64]) -> Vec<SpectralPeak> {
        let decimals = self.config.amplitude_decimals;
        dominant_peaks(spectrum, self.config.dominant_peak_count)
            .into_iter()
            .map(|peak| SpectralPeak {
                magnitude: round_to(peak.magnitude, decimals),
                ..peak
            })
            .collect()
    }

    /// Classify a spectrum, stamping the verdict with the current time.
    pub fn classify(&self, rpm: f64, spectrum: &[f64]) -> FaultVerdict {
        self.classify_at(rpm, spectrum, Utc::now())
    }

    /// Classify a spectrum with an explicit timestamp.
    pub fn classify_at(&self, rpm: f64, spectrum: &[f64], timestamp: DateTime<Utc>) -> FaultVerdict {
        let rpm = normalize_rpm(rpm);
        let harmonics = harmonic_set(rpm);
        let raw = self.amplitudes(rpm, spectrum);
        let (fault_type, confidence) = self.decide(&raw);

        let decimals = self.config.amplitude_decimals;
        let amplitudes = HarmonicAmplitudes {
            v1_max: round_to(raw.v1_max, decimals),
            v2_max: round_to(raw.v2_max, decimals),
            v3_max: round_to(raw.v3_max, decimals),
        };

        debug!(
            rpm,
            o1 = harmonics.o1,
            o2 = harmonics.o2,
            o3 = harmonics.o3,
            v1 = amplitudes.v1_max,
            v2 = amplitudes.v2_max,
            v3 = amplitudes.v3_max,
            fault = %fault_type,
            confidence = %confidence,
            bins = spectrum.len(),
            "Harmonic fault classified"
        );

        FaultVerdict {
            fault_type,
            confidence,
            description: fault_type.description().to_string(),
            rpm,
            harmonics,
            amplitudes,
            timestamp,
        }
    }
}

/// Classify from the three FFT channels.
///
/// All three harmonics are read from F1; F2 and F3 are accepted for
/// interface compatibility but not consulted.
pub fn classify_fault(
    rpm: f64,
    spectrum_f1: &[f64],
    _spectrum_f2: Option<&[f64]>,
    _spectrum_f3: Option<&[f64]>,
) -> FaultVerdict {
    HarmonicFaultClassifier::default().classify(rpm, spectrum_f1)
}
