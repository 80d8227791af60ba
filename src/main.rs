//! vibration-diag - machinery fault and ISO 10816 severity classification
//!
//! Reads telemetry payloads captured from the FFT, tachometer and vibration
//! services and prints a JSON verdict on stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Fault type from an FFT payload at a known speed
//! vibration-diag fault --fft fft.json --rpm 1800
//!
//! # Speed taken from a tachometer payload, FFT payload from stdin
//! curl -s $FFT_URL | vibration-diag fault --fft - --rpm-file rpm.json
//!
//! # Severity of a known peak, or of raw time-domain samples
//! vibration-diag severity --class 2 --amplitude 3.4
//! vibration-diag severity --class 1 --samples vib.json --channel all
//!
//! # Both at once
//! vibration-diag report --fft fft.json --rpm-file rpm.json --samples vib.json --class 3
//! ```
//!
//! # Environment Variables
//!
//! - `VIBRATION_DIAG_CONFIG`: Path to a TOML config file
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use vibration_diag::config::defaults::DEFAULT_LOG_FILTER;
use vibration_diag::{
    ConditionMonitor, DiagConfig, FaultVerdict, FftPayload, MachineClass, PeakMode, RpmPayload,
    SpectralPeak, TelemetrySnapshot, VibrationSamples,
};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "vibration-diag")]
#[command(about = "Machinery fault and ISO 10816 vibration severity classification")]
#[command(version)]
struct CliArgs {
    /// Load this TOML config instead of searching the default locations
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: SubCommand,
}

/// Where the shaft speed comes from
#[derive(clap::Args, Debug)]
#[group(required = true, multiple = false)]
struct RpmSource {
    /// Shaft speed in RPM
    #[arg(long, allow_negative_numbers = true)]
    rpm: Option<f64>,

    /// Tachometer payload (`{"R1": ...}`), or `-` for stdin
    #[arg(long, value_name = "PATH")]
    rpm_file: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Classify the machine fault type from an FFT payload
    Fault {
        /// FFT payload (`{"raw_data": {"F1": [...]}}`), or `-` for stdin
        #[arg(long, value_name = "PATH")]
        fft: String,

        #[command(flatten)]
        rpm: RpmSource,
    },

    /// Classify vibration severity for an ISO 10816 machine class
    Severity {
        /// Machine class: 1, 2, 3 or 4
        #[arg(long)]
        class: MachineClass,

        /// Peak velocity in mm/s
        #[arg(
            long,
            allow_negative_numbers = true,
            conflicts_with = "samples",
            required_unless_present = "samples"
        )]
        amplitude: Option<f64>,

        /// Time-domain payload (`[{"V1": [...], ...}]`), or `-` for stdin
        #[arg(long, value_name = "PATH")]
        samples: Option<String>,

        /// Channel used for peak extraction: 1, 2, 3 or all
        #[arg(long, default_value = "1", requires = "samples")]
        channel: PeakMode,
    },

    /// Run both classifiers and print a combined report
    Report {
        #[arg(long, value_name = "PATH")]
        fft: String,

        #[command(flatten)]
        rpm: RpmSource,

        #[arg(long, value_name = "PATH")]
        samples: String,

        /// Machine class: 1, 2, 3 or 4
        #[arg(long)]
        class: MachineClass,

        /// Channel used for peak extraction: 1, 2, 3 or all
        #[arg(long, default_value = "1")]
        channel: PeakMode,
    },

    /// Print the effective configuration as TOML
    Config,
}

// ============================================================================
// Input helpers
// ============================================================================

fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read payload from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(Path::new(source))
            .with_context(|| format!("Failed to read payload from {source}"))
    }
}

fn resolve_rpm(source: &RpmSource) -> Result<f64> {
    match (source.rpm, source.rpm_file.as_deref()) {
        (Some(rpm), _) => Ok(rpm),
        (None, Some(path)) => {
            let payload = RpmPayload::from_json(&read_input(path)?)
                .with_context(|| format!("Invalid tachometer payload in {path}"))?;
            debug!(
                rpm = payload.rpm,
                order1 = ?payload.order1,
                order2 = ?payload.order2,
                order3 = ?payload.order3,
                "Shaft speed read from tachometer payload"
            );
            Ok(payload.rpm)
        }
        (None, None) => bail!("Either --rpm or --rpm-file is required"),
    }
}

fn load_fft(source: &str) -> Result<FftPayload> {
    FftPayload::from_json(&read_input(source)?)
        .with_context(|| format!("Invalid FFT payload in {source}"))
}

fn load_samples(source: &str) -> Result<VibrationSamples> {
    VibrationSamples::from_json(&read_input(source)?)
        .with_context(|| format!("Invalid vibration payload in {source}"))
}

/// `fault` output: the verdict plus the strongest F1 bins
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FaultOutput {
    #[serde(flatten)]
    verdict: FaultVerdict,
    dominant_peaks: Vec<SpectralPeak>,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{out}");
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<DiagConfig> {
    match path {
        Some(p) => {
            let config = DiagConfig::load_from_file(p)
                .with_context(|| format!("Failed to load config {}", p.display()))?;
            info!(path = %p.display(), "Loaded diagnostics config");
            Ok(config)
        }
        None => Ok(DiagConfig::load()),
    }
}

// ============================================================================
// Main
// ============================================================================

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.json_logs);

    let config = load_config(args.config.as_deref())?;
    let monitor = ConditionMonitor::new(&config);

    match args.command {
        SubCommand::Fault { fft, rpm } => {
            let rpm = resolve_rpm(&rpm)?;
            let payload = load_fft(&fft)?;
            let classifier = monitor.fault_classifier();
            let verdict = classifier.classify(rpm, &payload.raw_data.f1);
            info!(fault = %verdict.fault_type, confidence = %verdict.confidence, "Fault analysis complete");
            print_json(&FaultOutput {
                dominant_peaks: classifier.dominant_peaks(&payload.raw_data.f1),
                verdict,
            })
        }
        SubCommand::Severity {
            class,
            amplitude,
            samples,
            channel,
        } => {
            let severity = monitor.severity_classifier();
            let (peak, verdict) = match (amplitude, samples) {
                (Some(amplitude), _) => severity.classify_amplitude(amplitude, class),
                (None, Some(path)) => severity.classify_samples(&load_samples(&path)?, channel, class),
                (None, None) => bail!("Either --amplitude or --samples is required"),
            };
            info!(peak, status = %verdict.status, class = %class, "Severity assessment complete");
            print_json(&serde_json::json!({
                "machineClass": class,
                "peakAmplitude": peak,
                "status": verdict.status,
                "color": verdict.color,
            }))
        }
        SubCommand::Report {
            fft,
            rpm,
            samples,
            class: machine_class,
            channel: peak_mode,
        } => {
            let rpm = resolve_rpm(&rpm)?;
            let payload = load_fft(&fft)?;
            let samples = load_samples(&samples)?;
            let report = monitor.assess(&TelemetrySnapshot {
                rpm,
                spectra: Some(&payload.raw_data),
                samples: Some(&samples),
                peak_mode,
                machine_class,
            });
            print_json(&report)
        }
        SubCommand::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}
