//! ISO 10816 Severity Classifier
//!
//! Maps a peak vibration velocity (mm/s) and a machine class to one of four
//! severity tiers. Each threshold is the inclusive upper bound of its tier.

use tracing::debug;

use crate::config::SeverityConfig;
use crate::types::{
    ClassThresholds, DiagnosticError, MachineClass, PeakMode, SeverityStatus, SeverityVerdict,
    VibrationChannel, VibrationSamples,
};

/// Velocity magnitude actually compared against the thresholds. NaN is 0.
pub fn velocity_magnitude(amplitude: f64) -> f64 {
    if amplitude.is_nan() {
        0.0
    } else {
        amplitude.abs()
    }
}

/// Tier for an amplitude against one class's thresholds.
///
/// Only the magnitude matters.
pub fn severity_status(amplitude: f64, thresholds: &ClassThresholds) -> SeverityStatus {
    let magnitude = velocity_magnitude(amplitude);

    if magnitude <= thresholds.good {
        SeverityStatus::Good
    } else if magnitude <= thresholds.satisfactory {
        SeverityStatus::Satisfactory
    } else if magnitude <= thresholds.unsatisfactory {
        SeverityStatus::Unsatisfactory
    } else {
        SeverityStatus::Unacceptable
    }
}

/// Largest absolute value among the first `limit` samples; 0 when empty.
pub fn channel_peak(samples: &[f64], limit: usize) -> f64 {
    samples
        .iter()
        .take(limit)
        .filter(|v| v.is_finite())
        .map(|v| v.abs())
        .fold(0.0, f64::max)
}

/// Peak amplitude for a single channel or across all three.
pub fn peak_amplitude(samples: &VibrationSamples, mode: PeakMode, limit: usize) -> f64 {
    match mode {
        PeakMode::Channel(channel) => channel_peak(samples.channel(channel), limit),
        PeakMode::All => [VibrationChannel::V1, VibrationChannel::V2, VibrationChannel::V3]
            .into_iter()
            .map(|c| channel_peak(samples.channel(c), limit))
            .fold(0.0, f64::max),
    }
}

/// Stateless severity classifier bound to a threshold table
#[derive(Debug, Clone, Default)]
pub struct SeverityClassifier {
    config: SeverityConfig,
}

impl SeverityClassifier {
    pub fn new(config: SeverityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SeverityConfig {
        &self.config
    }

    pub fn classify(&self, amplitude: f64, class: MachineClass) -> SeverityVerdict {
        let status = severity_status(amplitude, &self.config.thresholds_for(class));
        debug!(amplitude, class = %class, status = %status, "Vibration severity classified");
        status.into()
    }

    /// Classify a caller-supplied peak, returning the magnitude that was used.
    pub fn classify_amplitude(&self, amplitude: f64, class: MachineClass) -> (f64, SeverityVerdict) {
        (velocity_magnitude(amplitude), self.classify(amplitude, class))
    }

    /// Extract the peak from raw samples, then classify it.
    ///
    /// Returns the peak alongside the verdict so callers can display it.
    pub fn classify_samples(
        &self,
        samples: &VibrationSamples,
        mode: PeakMode,
        class: MachineClass,
    ) -> (f64, SeverityVerdict) {
        let peak = peak_amplitude(samples, mode, self.config.sample_limit);
        (peak, self.classify(peak, class))
    }
}

/// Classify against the standard ISO table using a "1".."4" class selector.
pub fn classify_severity(
    amplitude: f64,
    machine_class: &str,
) -> Result<SeverityVerdict, DiagnosticError> {
    let class: MachineClass = machine_class.parse()?;
    Ok(SeverityClassifier::default().classify(amplitude, class))
}
