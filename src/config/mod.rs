//! Diagnostics Configuration Module
//!
//! Rule constants and ISO 10816 class thresholds as operator-tunable TOML
//! values.
//!
//! ## Loading Order
//!
//! 1. `VIBRATION_DIAG_CONFIG` environment variable (path to TOML file)
//! 2. `vibration_diag.toml` in the current working directory
//! 3. Built-in defaults (the ISO 10816 table and the standard harmonic rules)
//!
//! ## Usage
//!
//! There is no global instance. Load once and hand the relevant section to
//! the classifiers:
//!
//! ```ignore
//! let config = DiagConfig::load();
//! let classifier = HarmonicFaultClassifier::new(config.harmonics.clone());
//! ```

mod diag_config;
pub mod defaults;
pub mod validation;

pub use diag_config::*;
