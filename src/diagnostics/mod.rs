//! Diagnostics Module
//!
//! Deterministic vibration classification. Every function here is pure:
//! inputs in, a freshly built verdict out, no retained state and no I/O,
//! so calls are safe from any number of threads.
//!
//! - `HarmonicFaultClassifier` - fault type from 1x/2x/3x harmonic amplitudes
//! - `SeverityClassifier` - ISO 10816 tier from a peak velocity
//! - `ConditionMonitor` - both over one telemetry snapshot

pub mod fault;
pub mod harmonics;
pub mod report;
pub mod severity;

pub use fault::{classify_fault, FaultRule, HarmonicFaultClassifier, FAULT_RULES};
pub use harmonics::{dominant_peaks, harmonic_set, windowed_max};
pub use report::{ConditionMonitor, ConditionReport, SeverityAssessment, TelemetrySnapshot};
pub use severity::{
    channel_peak, classify_severity, peak_amplitude, severity_status, velocity_magnitude,
    SeverityClassifier,
};
