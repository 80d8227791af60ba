//! Upstream telemetry payloads
//!
//! JSON shapes produced by the external FFT, tachometer and vibration
//! services. Numeric entries are parsed leniently: numbers pass through,
//! numeric strings are parsed, and anything else (null, garbage, NaN)
//! becomes 0. Only a malformed document structure is an error.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{DiagnosticError, VibrationChannel};

/// Parse one loosely-typed numeric entry; unparseable input is 0.
pub fn lenient_number(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(_) | Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    };
    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

fn lenient_samples<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .iter()
        .map(lenient_number)
        .collect())
}

fn lenient_scalar<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(lenient_number(&raw))
}

fn lenient_optional<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(raw.as_ref().map(lenient_number))
}

// ============================================================================
// FFT service
// ============================================================================

/// FFT magnitude spectra for the three accelerometer channels
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChannelSpectra {
    #[serde(rename = "F1", default, deserialize_with = "lenient_samples")]
    pub f1: Vec<f64>,
    #[serde(rename = "F2", default, deserialize_with = "lenient_samples")]
    pub f2: Vec<f64>,
    #[serde(rename = "F3", default, deserialize_with = "lenient_samples")]
    pub f3: Vec<f64>,
}

/// `{"raw_data": {"F1": [...], "F2": [...], "F3": [...]}}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FftPayload {
    #[serde(default)]
    pub raw_data: ChannelSpectra,
}

impl FftPayload {
    pub fn from_json(raw: &str) -> Result<Self, DiagnosticError> {
        Ok(serde_json::from_str(raw)?)
    }
}

// ============================================================================
// Tachometer service
// ============================================================================

/// `{"R1": 1800, "O1": .., "O2": .., "O3": ..}` - the live spindle speed.
///
/// `O1`..`O3` are the tachometer's own order-analysis readings. They are
/// carried for display and cross-checking only; harmonic bins are always
/// derived from `R1`. Absent orders stay `None`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct RpmPayload {
    #[serde(rename = "R1", default, deserialize_with = "lenient_scalar")]
    pub rpm: f64,
    #[serde(rename = "O1", default, deserialize_with = "lenient_optional")]
    pub order1: Option<f64>,
    #[serde(rename = "O2", default, deserialize_with = "lenient_optional")]
    pub order2: Option<f64>,
    #[serde(rename = "O3", default, deserialize_with = "lenient_optional")]
    pub order3: Option<f64>,
}

impl RpmPayload {
    pub fn from_json(raw: &str) -> Result<Self, DiagnosticError> {
        Ok(serde_json::from_str(raw)?)
    }
}

// ============================================================================
// Time-domain vibration service
// ============================================================================

/// Raw velocity samples for the three vibration channels
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VibrationSamples {
    #[serde(rename = "V1", default, deserialize_with = "lenient_samples")]
    pub v1: Vec<f64>,
    #[serde(rename = "V2", default, deserialize_with = "lenient_samples")]
    pub v2: Vec<f64>,
    #[serde(rename = "V3", default, deserialize_with = "lenient_samples")]
    pub v3: Vec<f64>,
}

impl VibrationSamples {
    pub fn channel(&self, channel: VibrationChannel) -> &[f64] {
        match channel {
            VibrationChannel::V1 => &self.v1,
            VibrationChannel::V2 => &self.v2,
            VibrationChannel::V3 => &self.v3,
        }
    }

    /// Parse the service response, `[{"V1": [...], ...}, ...]`.
    ///
    /// Only the most recent (first) record is used; an empty array yields
    /// empty channels.
    pub fn from_json(raw: &str) -> Result<Self, DiagnosticError> {
        let records: Vec<VibrationSamples> = serde_json::from_str(raw)?;
        Ok(records.into_iter().next().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lenient_number_variants() {
        assert_eq!(lenient_number(&json!(2.5)), 2.5);
        assert_eq!(lenient_number(&json!(" 1.25 ")), 1.25);
        assert_eq!(lenient_number(&json!("abc")), 0.0);
        assert_eq!(lenient_number(&json!(null)), 0.0);
        assert_eq!(lenient_number(&json!(true)), 0.0);
        assert_eq!(lenient_number(&json!("NaN")), 0.0);
        assert_eq!(lenient_number(&json!("inf")), 0.0);
    }

    #[test]
    fn test_fft_payload_missing_channels() {
        let payload = FftPayload::from_json(r#"{"raw_data": {"F1": [0, "3.5", null]}}"#)
            .expect("payload parses");
        assert_eq!(payload.raw_data.f1, vec![0.0, 3.5, 0.0]);
        assert!(payload.raw_data.f2.is_empty());
        assert!(payload.raw_data.f3.is_empty());
    }

    #[test]
    fn test_fft_payload_without_raw_data() {
        let payload = FftPayload::from_json("{}").expect("payload parses");
        assert!(payload.raw_data.f1.is_empty());
    }

    #[test]
    fn test_rpm_payload_string_value() {
        let payload = RpmPayload::from_json(r#"{"R1": "1800"}"#).expect("payload parses");
        assert_eq!(payload.rpm, 1800.0);
        assert_eq!(payload.order1, None);
    }

    #[test]
    fn test_rpm_payload_order_readings() {
        let payload = RpmPayload::from_json(r#"{"R1": 1800, "O1": 30, "O2": "60.5", "O3": "x"}"#)
            .expect("payload parses");
        assert_eq!(payload.order1, Some(30.0));
        assert_eq!(payload.order2, Some(60.5));
        assert_eq!(payload.order3, Some(0.0));
    }

    #[test]
    fn test_vibration_first_record_wins() {
        let samples =
            VibrationSamples::from_json(r#"[{"V1": [1, 2]}, {"V1": [9, 9]}]"#).expect("parses");
        assert_eq!(samples.channel(VibrationChannel::V1), &[1.0, 2.0]);
        assert!(samples.channel(VibrationChannel::V3).is_empty());
    }

    #[test]
    fn test_vibration_empty_array() {
        let samples = VibrationSamples::from_json("[]").expect("parses");
        assert_eq!(samples, VibrationSamples::default());
    }

    #[test]
    fn test_structural_error_is_reported() {
        assert!(FftPayload::from_json("not json").is_err());
        assert!(VibrationSamples::from_json(r#"{"V1": []}"#).is_err());
    }
}
