//! Vibration Diagnostics: machinery fault and severity classification
//!
//! Classifies rotating-machine condition from telemetry that an external
//! service has already captured.
//!
//! ## Architecture
//!
//! - **Harmonic Fault Classifier**: fault type from the FFT amplitudes at
//!   the 1x/2x/3x shaft harmonics
//! - **Severity Classifier**: ISO 10816 tier from a peak vibration velocity
//!   and a machine class
//! - **Config**: TOML-tunable rule constants and class thresholds
//!
//! ```ignore
//! let verdict = vibration_diag::classify_fault(1800.0, &spectrum_f1, None, None);
//! let severity = vibration_diag::classify_severity(3.2, "2")?;
//! ```

pub mod config;
pub mod diagnostics;
pub mod types;

pub use config::DiagConfig;

pub use diagnostics::{
    classify_fault, classify_severity, ConditionMonitor, ConditionReport,
    HarmonicFaultClassifier, SeverityClassifier, TelemetrySnapshot,
};

pub use types::{
    ChannelSpectra, ClassThresholds, Confidence, DiagnosticError, FaultType, FaultVerdict,
    FftPayload, HarmonicAmplitudes, HarmonicSet, MachineClass, PeakMode, RpmPayload,
    SeverityStatus, SeverityVerdict, SpectralPeak, VibrationChannel, VibrationSamples,
};
