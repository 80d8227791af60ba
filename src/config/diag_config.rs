//! Diagnostics Configuration - rule constants and class thresholds as TOML
//!
//! Each struct implements `Default` with the standard values, so a missing
//! or empty config file changes nothing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults::{CONFIG_ENV_VAR, LOCAL_CONFIG_FILE, MAX_AMPLITUDE_DECIMALS};
use crate::types::{
    harmonic_thresholds, severity_thresholds, ClassThresholds, MachineClass, CLASS_I, CLASS_II,
    CLASS_III, CLASS_IV,
};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with `DiagConfig::load()` which searches:
/// 1. `$VIBRATION_DIAG_CONFIG` env var
/// 2. `./vibration_diag.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagConfig {
    /// Harmonic fault classifier tuning
    #[serde(default)]
    pub harmonics: HarmonicConfig,

    /// Severity classifier tuning and ISO class tables
    #[serde(default)]
    pub severity: SeverityConfig,
}

impl DiagConfig {
    /// Load configuration using the standard search order, falling back on
    /// any unreadable or invalid file.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded diagnostics config from {CONFIG_ENV_VAR}");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {CONFIG_ENV_VAR}, falling back");
                    }
                }
            } else {
                warn!(path = %path, "{CONFIG_ENV_VAR} points to non-existent file, falling back");
            }
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded diagnostics config from ./{LOCAL_CONFIG_FILE}");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{LOCAL_CONFIG_FILE}, using defaults");
                }
            }
        }

        info!("No {LOCAL_CONFIG_FILE} found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document. Unknown keys only warn.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Diagnostics config saved");
        Ok(())
    }

    /// Validate all values for internal consistency.
    ///
    /// Rules:
    /// - Every class triple is finite, positive and strictly increasing
    /// - Harmonic floors are finite and non-negative
    /// - Rounding precision and sample limit are within range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        for class in MachineClass::ALL {
            Self::check_ordering(
                &self.severity.thresholds_for(class),
                &format!("severity.{}", SeverityConfig::section_name(class)),
                &mut errors,
            );
        }

        let h = &self.harmonics;
        Self::check_floor(h.no_fault_floor, "harmonics.no_fault_floor", &mut errors);
        Self::check_floor(
            h.third_harmonic_floor,
            "harmonics.third_harmonic_floor",
            &mut errors,
        );
        if h.amplitude_decimals > MAX_AMPLITUDE_DECIMALS {
            errors.push(format!(
                "harmonics.amplitude_decimals ({}) must be <= {MAX_AMPLITUDE_DECIMALS}",
                h.amplitude_decimals
            ));
        }

        if self.severity.sample_limit == 0 {
            errors.push("severity.sample_limit must be > 0".to_string());
        }

        for w in super::validation::validate_physical_ranges(self) {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_ordering(t: &ClassThresholds, name: &str, errors: &mut Vec<String>) {
        // NaN comparisons silently pass, so check finiteness first
        if ![t.good, t.satisfactory, t.unsatisfactory]
            .iter()
            .all(|v| v.is_finite())
        {
            errors.push(format!(
                "{name}: values must be finite (got good={}, satisfactory={}, unsatisfactory={})",
                t.good, t.satisfactory, t.unsatisfactory
            ));
            return;
        }
        if t.good <= 0.0 {
            errors.push(format!("{name}.good ({:.2}) must be > 0", t.good));
        }
        if !t.is_well_ordered() && t.good > 0.0 {
            errors.push(format!(
                "{name}: thresholds must be strictly increasing (good {:.2} < satisfactory {:.2} < unsatisfactory {:.2})",
                t.good, t.satisfactory, t.unsatisfactory
            ));
        }
    }

    fn check_floor(value: f64, name: &str, errors: &mut Vec<String>) {
        if !value.is_finite() || value < 0.0 {
            errors.push(format!("{name} ({value}) must be a finite, non-negative number"));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {e}"),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {e}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Harmonic Classifier Config
// ============================================================================

/// Window and amplitude limits for the harmonic fault rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmonicConfig {
    /// Bins searched on each side of a harmonic order.
    #[serde(default = "default_window_radius")]
    pub window_radius: usize,

    /// All three amplitudes below this classify as no fault.
    #[serde(default = "default_no_fault_floor")]
    pub no_fault_floor: f64,

    /// 3x amplitude splitting bent rotor from angular misalignment.
    #[serde(default = "default_third_harmonic_floor")]
    pub third_harmonic_floor: f64,

    /// Decimal places kept on reported amplitudes.
    #[serde(default = "default_amplitude_decimals")]
    pub amplitude_decimals: u32,

    /// Strongest F1 bins reported next to the verdict. 0 disables.
    #[serde(default = "default_dominant_peak_count")]
    pub dominant_peak_count: usize,
}

fn default_window_radius() -> usize { harmonic_thresholds::WINDOW_RADIUS }
fn default_no_fault_floor() -> f64 { harmonic_thresholds::NO_FAULT_FLOOR }
fn default_third_harmonic_floor() -> f64 { harmonic_thresholds::THIRD_HARMONIC_FLOOR }
fn default_amplitude_decimals() -> u32 { harmonic_thresholds::AMPLITUDE_DECIMALS }
fn default_dominant_peak_count() -> usize { harmonic_thresholds::DOMINANT_PEAK_COUNT }

impl Default for HarmonicConfig {
    fn default() -> Self {
        Self {
            window_radius: default_window_radius(),
            no_fault_floor: default_no_fault_floor(),
            third_harmonic_floor: default_third_harmonic_floor(),
            amplitude_decimals: default_amplitude_decimals(),
            dominant_peak_count: default_dominant_peak_count(),
        }
    }
}

// ============================================================================
// Severity Classifier Config
// ============================================================================

/// Peak extraction limit and per-class ISO 10816 thresholds (mm/s).
///
/// A class table that is present must give all three values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityConfig {
    /// Samples scanned per channel during peak extraction.
    #[serde(default = "default_sample_limit")]
    pub sample_limit: usize,

    #[serde(default = "default_class_i")]
    pub class_i: ClassThresholds,

    #[serde(default = "default_class_ii")]
    pub class_ii: ClassThresholds,

    #[serde(default = "default_class_iii")]
    pub class_iii: ClassThresholds,

    #[serde(default = "default_class_iv")]
    pub class_iv: ClassThresholds,
}

fn default_sample_limit() -> usize { severity_thresholds::SAMPLE_LIMIT }
fn default_class_i() -> ClassThresholds { CLASS_I }
fn default_class_ii() -> ClassThresholds { CLASS_II }
fn default_class_iii() -> ClassThresholds { CLASS_III }
fn default_class_iv() -> ClassThresholds { CLASS_IV }

impl Default for SeverityConfig {
    fn default() -> Self {
        Self {
            sample_limit: default_sample_limit(),
            class_i: default_class_i(),
            class_ii: default_class_ii(),
            class_iii: default_class_iii(),
            class_iv: default_class_iv(),
        }
    }
}

impl SeverityConfig {
    /// Threshold triple bound to a machine class
    pub fn thresholds_for(&self, class: MachineClass) -> ClassThresholds {
        match class {
            MachineClass::I => self.class_i,
            MachineClass::II => self.class_ii,
            MachineClass::III => self.class_iii,
            MachineClass::IV => self.class_iv,
        }
    }

    /// TOML table name holding a class's thresholds
    pub fn section_name(class: MachineClass) -> &'static str {
        match class {
            MachineClass::I => "class_i",
            MachineClass::II => "class_ii",
            MachineClass::III => "class_iii",
            MachineClass::IV => "class_iv",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
