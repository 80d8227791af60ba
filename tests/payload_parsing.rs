//! Payload Parsing Tests
//!
//! Feeds upstream service payloads through parsing and classification the
//! way the CLI does, including the lenient handling of bad entries.

use vibration_diag::{
    ConditionMonitor, FaultType, FftPayload, MachineClass, PeakMode, RpmPayload, SeverityStatus,
    TelemetrySnapshot, VibrationSamples,
};

/// FFT payload with the 1x/2x/3x peaks of a 1800 RPM shaft in F1.
fn fft_payload_json() -> String {
    let mut f1: Vec<serde_json::Value> = vec![serde_json::json!(0.0); 256];
    f1[30] = serde_json::json!(5.0);
    f1[60] = serde_json::json!("1.0");
    f1[90] = serde_json::json!(0.2);
    f1[10] = serde_json::json!("garbage");
    f1[11] = serde_json::Value::Null;
    serde_json::json!({
        "raw_data": {
            "F1": f1,
            "F2": [0.0, 9.0],
        },
        "timestamp": "ignored"
    })
    .to_string()
}

#[test]
fn fft_payload_feeds_fault_classifier() {
    let payload = FftPayload::from_json(&fft_payload_json()).expect("payload parses");
    assert_eq!(payload.raw_data.f1.len(), 256);
    assert_eq!(payload.raw_data.f1[10], 0.0);
    assert_eq!(payload.raw_data.f1[60], 1.0);
    assert!(payload.raw_data.f3.is_empty());

    let rpm = RpmPayload::from_json(r#"{"R1": 1800}"#).expect("rpm parses").rpm;
    let verdict = ConditionMonitor::default()
        .fault_classifier()
        .classify(rpm, &payload.raw_data.f1);
    assert_eq!(verdict.fault_type, FaultType::Unbalance);
}

#[test]
fn missing_rpm_reads_as_zero() {
    let payload = RpmPayload::from_json("{}").expect("empty object parses");
    assert_eq!(payload.rpm, 0.0);
    let garbage = RpmPayload::from_json(r#"{"R1": "n/a"}"#).expect("garbage parses");
    assert_eq!(garbage.rpm, 0.0);
}

#[test]
fn vibration_payload_feeds_severity_report() {
    let samples = VibrationSamples::from_json(
        r#"[{"V1": [0.2, "-3.1", null], "V2": [1.0], "V3": "not-an-array-entry-list"}]"#,
    );
    // V3 is structurally wrong (string instead of array)
    assert!(samples.is_err());

    let samples =
        VibrationSamples::from_json(r#"[{"V1": [0.2, "-3.1", null], "V2": [1.0]}]"#)
            .expect("payload parses");
    let report = ConditionMonitor::default().assess(&TelemetrySnapshot {
        rpm: 0.0,
        spectra: None,
        samples: Some(&samples),
        peak_mode: PeakMode::All,
        machine_class: MachineClass::I,
    });
    let severity = report.severity.expect("severity present");
    assert_eq!(severity.peak_amplitude, 3.1);
    assert_eq!(severity.verdict.status, SeverityStatus::Unsatisfactory);
}

#[test]
fn report_serializes_for_presentation_layer() {
    let payload = FftPayload::from_json(&fft_payload_json()).expect("payload parses");
    let samples = VibrationSamples::from_json(r#"[{"V1": [0.5]}]"#).expect("payload parses");
    let report = ConditionMonitor::default().assess(&TelemetrySnapshot {
        rpm: 1800.0,
        spectra: Some(&payload.raw_data),
        samples: Some(&samples),
        peak_mode: PeakMode::default(),
        machine_class: MachineClass::II,
    });
    let json = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(json["fault"]["faultType"], "Unbalance");
    assert_eq!(json["fault"]["harmonics"]["o3"], 90);
    assert_eq!(json["severity"]["verdict"]["status"], "Good");
    assert_eq!(json["severity"]["verdict"]["color"], "#10b981");
    assert_eq!(json["dominantPeaks"][0]["bin"], 30);
    assert_eq!(json["dominantPeaks"][1]["bin"], 60);
    assert_eq!(json["dominantPeaks"][2]["magnitude"], 0.2);
}

#[test]
fn tachometer_orders_do_not_move_harmonics() {
    let payload = RpmPayload::from_json(r#"{"R1": 1800, "O1": 12.5, "O2": 7, "O3": null}"#)
        .expect("payload parses");
    assert_eq!(payload.order1, Some(12.5));
    assert_eq!(payload.order2, Some(7.0));
    assert_eq!(payload.order3, None);
    let spectrum = [0.0; 128];
    let verdict = ConditionMonitor::default()
        .fault_classifier()
        .classify(payload.rpm, &spectrum);
    assert_eq!(verdict.harmonics.orders(), [30, 60, 90]);
}
