//! Severity types: MachineClass, SeverityStatus, SeverityVerdict, PeakMode

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::DiagnosticError;

/// ISO 10816 machine class
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MachineClass {
    I,
    II,
    III,
    IV,
}

impl MachineClass {
    pub const ALL: [MachineClass; 4] = [
        MachineClass::I,
        MachineClass::II,
        MachineClass::III,
        MachineClass::IV,
    ];

    /// Mounting/size category the class stands for
    pub fn label(&self) -> &'static str {
        match self {
            MachineClass::I => "Small machines",
            MachineClass::II => "Medium machines",
            MachineClass::III => "Large rigid foundation",
            MachineClass::IV => "Large soft foundation",
        }
    }
}

impl FromStr for MachineClass {
    type Err = DiagnosticError;

    /// Accepts the numeric selector ("1".."4") or roman numerals, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1" | "I" => Ok(MachineClass::I),
            "2" | "II" => Ok(MachineClass::II),
            "3" | "III" => Ok(MachineClass::III),
            "4" | "IV" => Ok(MachineClass::IV),
            _ => Err(DiagnosticError::InvalidMachineClass(s.to_string())),
        }
    }
}

impl std::fmt::Display for MachineClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MachineClass::I => write!(f, "Class I"),
            MachineClass::II => write!(f, "Class II"),
            MachineClass::III => write!(f, "Class III"),
            MachineClass::IV => write!(f, "Class IV"),
        }
    }
}

/// Severity tier, ordered from best to worst
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeverityStatus {
    Good,
    Satisfactory,
    Unsatisfactory,
    Unacceptable,
}

impl SeverityStatus {
    /// Display colour for the tier (hex)
    pub fn color(&self) -> &'static str {
        match self {
            SeverityStatus::Good => "#10b981",
            SeverityStatus::Satisfactory => "#a3e635",
            SeverityStatus::Unsatisfactory => "#f97316",
            SeverityStatus::Unacceptable => "#ef4444",
        }
    }
}

impl std::fmt::Display for SeverityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeverityStatus::Good => write!(f, "Good"),
            SeverityStatus::Satisfactory => write!(f, "Satisfactory"),
            SeverityStatus::Unsatisfactory => write!(f, "Unsatisfactory"),
            SeverityStatus::Unacceptable => write!(f, "Unacceptable"),
        }
    }
}

/// Severity tier plus its display colour
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeverityVerdict {
    pub status: SeverityStatus,
    pub color: String,
}

impl From<SeverityStatus> for SeverityVerdict {
    fn from(status: SeverityStatus) -> Self {
        Self {
            status,
            color: status.color().to_string(),
        }
    }
}

/// Time-domain vibration channel (V1..V3)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VibrationChannel {
    V1,
    V2,
    V3,
}

/// Which channel(s) feed peak extraction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PeakMode {
    Channel(VibrationChannel),
    /// Maximum across the per-channel peaks
    All,
}

impl Default for PeakMode {
    fn default() -> Self {
        PeakMode::Channel(VibrationChannel::V1)
    }
}

impl FromStr for PeakMode {
    type Err = DiagnosticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "v1" => Ok(PeakMode::Channel(VibrationChannel::V1)),
            "2" | "v2" => Ok(PeakMode::Channel(VibrationChannel::V2)),
            "3" | "v3" => Ok(PeakMode::Channel(VibrationChannel::V3)),
            "all" => Ok(PeakMode::All),
            _ => Err(DiagnosticError::InvalidChannel(s.to_string())),
        }
    }
}
