//! Shared data structures for vibration diagnostics
//!
//! - FaultVerdict and its parts (harmonic fault classifier output)
//! - SeverityVerdict, MachineClass (ISO 10816 severity classifier output)
//! - Upstream JSON payloads for spectra, RPM and time-domain samples

mod error;
mod fault;
mod payload;
mod severity;
// Public so the raw constant groups stay reachable as `types::thresholds::*`.
pub mod thresholds;

pub use error::*;
pub use fault::*;
pub use payload::*;
pub use severity::*;
pub use thresholds::{
    harmonic_thresholds, severity_thresholds, ClassThresholds, CLASS_I, CLASS_II, CLASS_III,
    CLASS_IV,
};
