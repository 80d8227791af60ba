//! System-wide default constants.
//!
//! Centralises the names and limits used by config loading and the CLI.

// ============================================================================
// Config Loading
// ============================================================================

/// Environment variable naming a TOML config file.
pub const CONFIG_ENV_VAR: &str = "VIBRATION_DIAG_CONFIG";

/// Config file looked up in the working directory when the env var is unset.
pub const LOCAL_CONFIG_FILE: &str = "vibration_diag.toml";

// ============================================================================
// Validation Limits
// ============================================================================

/// Largest rounding precision accepted for reported amplitudes.
///
/// Beyond ~12 places `10^n` scaling starts to lose f64 precision.
pub const MAX_AMPLITUDE_DECIMALS: u32 = 12;

/// Window radius above which a config warning is emitted (bins).
pub const SUSPICIOUS_WINDOW_RADIUS: usize = 50;

/// Severity threshold above which a config warning is emitted (mm/s).
///
/// ISO 10816 tables top out at 45 mm/s.
pub const SUSPICIOUS_THRESHOLD_MM_S: f64 = 100.0;

// ============================================================================
// Logging
// ============================================================================

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";
