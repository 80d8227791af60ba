//! Condition report: both classifiers run over one telemetry snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::fault::HarmonicFaultClassifier;
use super::severity::SeverityClassifier;
use crate::config::DiagConfig;
use crate::types::{
    ChannelSpectra, FaultVerdict, MachineClass, PeakMode, SeverityVerdict, SpectralPeak,
    VibrationSamples,
};

/// One snapshot of upstream telemetry, already in memory
#[derive(Debug, Clone, Copy)]
pub struct TelemetrySnapshot<'a> {
    pub rpm: f64,
    pub spectra: Option<&'a ChannelSpectra>,
    pub samples: Option<&'a VibrationSamples>,
    pub peak_mode: PeakMode,
    pub machine_class: MachineClass,
}

/// Severity half of a report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeverityAssessment {
    pub machine_class: MachineClass,
    pub peak_mode: PeakMode,
    /// Peak velocity that was classified (mm/s)
    pub peak_amplitude: f64,
    pub verdict: SeverityVerdict,
}

/// Combined output. A half is absent when its input was not supplied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConditionReport {
    pub fault: Option<FaultVerdict>,
    /// Strongest F1 bins; empty without spectra
    #[serde(default)]
    pub dominant_peaks: Vec<SpectralPeak>,
    pub severity: Option<SeverityAssessment>,
    pub generated_at: DateTime<Utc>,
}

/// Both classifiers configured from one [`DiagConfig`]
#[derive(Debug, Clone, Default)]
pub struct ConditionMonitor {
    fault: HarmonicFaultClassifier,
    severity: SeverityClassifier,
}

impl ConditionMonitor {
    pub fn new(config: &DiagConfig) -> Self {
        Self {
            fault: HarmonicFaultClassifier::new(config.harmonics.clone()),
            severity: SeverityClassifier::new(config.severity.clone()),
        }
    }

    pub fn fault_classifier(&self) -> &HarmonicFaultClassifier {
        &self.fault
    }

    pub fn severity_classifier(&self) -> &SeverityClassifier {
        &self.severity
    }

    pub fn assess(&self, snapshot: &TelemetrySnapshot<'_>) -> ConditionReport {
        self.assess_at(snapshot, Utc::now())
    }

    /// Both verdicts share `timestamp`.
    pub fn assess_at(
        &self,
        snapshot: &TelemetrySnapshot<'_>,
        timestamp: DateTime<Utc>,
    ) -> ConditionReport {
        let fault = snapshot
            .spectra
            .map(|spectra| self.fault.classify_at(snapshot.rpm, &spectra.f1, timestamp));
        let dominant_peaks = snapshot
            .spectra
            .map(|spectra| self.fault.dominant_peaks(&spectra.f1))
            .unwrap_or_default();

        let severity = snapshot.samples.map(|samples| {
            let (peak_amplitude, verdict) =
                self.severity
                    .classify_samples(samples, snapshot.peak_mode, snapshot.machine_class);
            SeverityAssessment {
                machine_class: snapshot.machine_class,
                peak_mode: snapshot.peak_mode,
                peak_amplitude,
                verdict,
            }
        });

        ConditionReport {
            fault,
            dominant_peaks,
            severity,
            generated_at: timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FaultType, SeverityStatus};

    fn snapshot<'a>(
        spectra: Option<&'a ChannelSpectra>,
        samples: Option<&'a VibrationSamples>,
    ) -> TelemetrySnapshot<'a> {
        TelemetrySnapshot {
            rpm: 1800.0,
            spectra,
            samples,
            peak_mode: PeakMode::All,
            machine_class: MachineClass::II,
        }
    }

    #[test]
    fn test_full_report() {
        let mut f1 = vec![0.0; 200];
        f1[30] = 5.0;
        f1[60] = 1.0;
        f1[90] = 0.2;
        let spectra = ChannelSpectra {
            f1,
            ..ChannelSpectra::default()
        };
        let samples = VibrationSamples {
            v1: vec![0.4, -2.0],
            v2: vec![5.0],
            v3: vec![1.0],
        };
        let now = Utc::now();
        let report =
            ConditionMonitor::default().assess_at(&snapshot(Some(&spectra), Some(&samples)), now);

        let fault = report.fault.expect("fault verdict present");
        assert_eq!(fault.fault_type, FaultType::Unbalance);
        assert_eq!(fault.timestamp, now);
        let bins: Vec<usize> = report.dominant_peaks.iter().map(|p| p.bin).collect();
        assert_eq!(bins, vec![30, 60, 90]);

        let severity = report.severity.expect("severity present");
        assert_eq!(severity.peak_amplitude, 5.0);
        assert_eq!(severity.verdict.status, SeverityStatus::Unsatisfactory);
        assert_eq!(report.generated_at, now);
    }

    #[test]
    fn test_missing_inputs_leave_gaps() {
        let report = ConditionMonitor::default().assess(&snapshot(None, None));
        assert!(report.fault.is_none());
        assert!(report.severity.is_none());
        assert!(report.dominant_peaks.is_empty());
    }

    #[test]
    fn test_monitor_uses_config() {
        let mut config = DiagConfig::default();
        config.severity.sample_limit = 1;
        let samples = VibrationSamples {
            v1: vec![0.1, 50.0],
            ..VibrationSamples::default()
        };
        let report = ConditionMonitor::new(&config).assess(&snapshot(None, Some(&samples)));
        let severity = report.severity.expect("severity present");
        assert_eq!(severity.peak_amplitude, 0.1);
        assert_eq!(severity.verdict.status, SeverityStatus::Good);
    }
}
