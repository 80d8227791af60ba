//! Config validation: unknown-key detection with Levenshtein suggestions
//! and physical range checks.
//!
//! Unknown keys are found by parsing the raw TOML into `toml::Value` and
//! walking its key tree before serde deserialization. They only warn, so a
//! typo never breaks an existing config.

use std::collections::HashSet;

use super::defaults::{SUSPICIOUS_THRESHOLD_MM_S, SUSPICIOUS_WINDOW_RADIUS};
use super::{DiagConfig, SeverityConfig};
use crate::types::MachineClass;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for DiagConfig.
///
/// Must be kept in step with the structs in diag_config.rs.
pub fn known_config_keys() -> HashSet<String> {
    let mut keys: HashSet<String> = [
        "harmonics",
        "harmonics.window_radius",
        "harmonics.no_fault_floor",
        "harmonics.third_harmonic_floor",
        "harmonics.amplitude_decimals",
        "harmonics.dominant_peak_count",
        "severity",
        "severity.sample_limit",
    ]
    .iter()
    .map(|k| (*k).to_string())
    .collect();

    for class in MachineClass::ALL {
        let section = format!("severity.{}", SeverityConfig::section_name(class));
        for leaf in ["good", "satisfactory", "unsatisfactory"] {
            keys.insert(format!("{section}.{leaf}"));
        }
        keys.insert(section);
    }
    keys
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties resolve to the lexicographically smallest key so output is stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<String>) -> Option<String> {
    known
        .iter()
        .map(|k| (levenshtein(unknown, k), k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.clone())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are reported by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// Flag values that are legal but unlikely to be intended.
pub fn validate_physical_ranges(config: &DiagConfig) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let radius = config.harmonics.window_radius;
    if radius > SUSPICIOUS_WINDOW_RADIUS {
        warnings.push(ValidationWarning {
            field: "harmonics.window_radius".to_string(),
            message: format!(
                "harmonics.window_radius = {radius} bins is wider than typical (<= {SUSPICIOUS_WINDOW_RADIUS})"
            ),
            suggestion: None,
        });
    }

    for class in MachineClass::ALL {
        let t = config.severity.thresholds_for(class);
        if t.unsatisfactory > SUSPICIOUS_THRESHOLD_MM_S {
            let field = format!(
                "severity.{}.unsatisfactory",
                SeverityConfig::section_name(class)
            );
            warnings.push(ValidationWarning {
                message: format!(
                    "{field} = {:.1} mm/s is outside the ISO 10816 range (<= {SUSPICIOUS_THRESHOLD_MM_S:.0} mm/s)",
                    t.unsatisfactory
                ),
                field,
                suggestion: None,
            });
        }
    }

    warnings
}

// ============================================================================
// Tests
// ============================================================================
