//! Harmonic order derivation and windowed peak search

use crate::types::{HarmonicSet, SpectralPeak};

/// Convert a shaft speed to its 1x/2x/3x harmonic bins.
///
/// `o1 = floor(rpm / 60)`. Negative, NaN or infinite speeds are treated as
/// 0 RPM, collapsing every harmonic onto bin 0.
pub fn harmonic_set(rpm: f64) -> HarmonicSet {
    let rpm = normalize_rpm(rpm);
    // `as` saturates for out-of-range floats
    let o1 = (rpm / 60.0).floor() as usize;
    HarmonicSet {
        o1,
        o2: o1.saturating_mul(2),
        o3: o1.saturating_mul(3),
    }
}

/// Clamp a caller-supplied speed into the finite, non-negative domain.
pub fn normalize_rpm(rpm: f64) -> f64 {
    if rpm.is_finite() && rpm > 0.0 {
        rpm
    } else {
        0.0
    }
}

/// Maximum spectrum value within `[center - radius, center + radius]`.
///
/// The window is clamped to the spectrum. An empty spectrum, or a window
/// lying entirely past the end, yields 0. Non-finite entries count as 0,
/// and the search starts from 0 so negative entries never win.
pub fn windowed_max(spectrum: &[f64], center: usize, radius: usize) -> f64 {
    let Some(last) = spectrum.len().checked_sub(1) else {
        return 0.0;
    };
    let start = center.saturating_sub(radius);
    let end = center.saturating_add(radius).min(last);
    if start > end {
        return 0.0;
    }

    spectrum[start..=end]
        .iter()
        .map(|&v| if v.is_finite() { v } else { 0.0 })
        .fold(0.0, f64::max)
}

/// The `n` largest bins by magnitude, largest first.
///
/// Non-finite entries count as 0. Equal magnitudes keep ascending bin
/// order. Returns fewer than `n` peaks when the spectrum is shorter.
pub fn dominant_peaks(spectrum: &[f64], n: usize) -> Vec<SpectralPeak> {
    let mut peaks: Vec<SpectralPeak> = spectrum
        .iter()
        .enumerate()
        .map(|(bin, &v)| SpectralPeak {
            bin,
            magnitude: if v.is_finite() { v.abs() } else { 0.0 },
        })
        .collect();
    // stable sort preserves bin order among ties
    peaks.sort_by(|a, b| b.magnitude.total_cmp(&a.magnitude));
    peaks.truncate(n);
    peaks
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harmonic_set_from_rpm() {
        let h = harmonic_set(1800.0);
        assert_eq!(h.orders(), [30, 60, 90]);
        // floor, not round
        assert_eq!(harmonic_set(1799.0).o1, 29);
        assert_eq!(harmonic_set(59.9).orders(), [0, 0, 0]);
    }

    #[test]
    fn test_degenerate_rpm_collapses_to_zero() {
        for rpm in [0.0, -120.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(harmonic_set(rpm), HarmonicSet::default(), "rpm {rpm}");
        }
    }

    #[test]
    fn test_windowed_max_basic() {
        let mut spectrum = vec![0.0; 100];
        spectrum[33] = 2.0;
        spectrum[36] = 9.0; // just outside radius 5 of 30
        assert_eq!(windowed_max(&spectrum, 30, 5), 2.0);
        assert_eq!(windowed_max(&spectrum, 31, 5), 9.0);
    }

    #[test]
    fn test_windowed_max_clamps_at_edges() {
        let spectrum = [4.0, 1.0, 0.5];
        assert_eq!(windowed_max(&spectrum, 0, 5), 4.0);
        assert_eq!(windowed_max(&spectrum, 6, 5), 1.0);
        assert_eq!(windowed_max(&spectrum, 7, 5), 0.5);
    }

    #[test]
    fn test_windowed_max_outside_spectrum() {
        let spectrum = [4.0, 1.0, 0.5];
        assert_eq!(windowed_max(&spectrum, 8, 5), 0.0);
        assert_eq!(windowed_max(&spectrum, usize::MAX, 5), 0.0);
        assert_eq!(windowed_max(&[], 0, 5), 0.0);
    }

    #[test]
    fn test_windowed_max_ignores_non_finite_and_negative() {
        let spectrum = [f64::NAN, -3.0, f64::INFINITY, 0.25];
        assert_eq!(windowed_max(&spectrum, 1, 5), 0.25);
        assert_eq!(windowed_max(&[-1.0, -2.0], 0, 5), 0.0);
    }

    #[test]
    fn test_windowed_max_is_monotonic() {
        let mut spectrum = vec![0.3, 0.1, 0.7, 0.2, 0.05];
        let before = windowed_max(&spectrum, 2, 1);
        spectrum[1] += 0.2;
        assert!(windowed_max(&spectrum, 2, 1) >= before);
        spectrum[3] = 5.0;
        assert_eq!(windowed_max(&spectrum, 2, 1), 5.0);
    }

    fn bins(peaks: &[SpectralPeak]) -> Vec<usize> {
        peaks.iter().map(|p| p.bin).collect()
    }

    #[test]
    fn test_dominant_peaks_ranked_by_magnitude() {
        let spectrum = [0.1, -4.0, 2.0, 0.0, 3.0];
        let peaks = dominant_peaks(&spectrum, 3);
        assert_eq!(bins(&peaks), vec![1, 4, 2]);
        assert_eq!(peaks[0].magnitude, 4.0);
    }

    #[test]
    fn test_dominant_peaks_ties_keep_bin_order() {
        let spectrum = [1.0, 2.0, 1.0, 2.0, 1.0];
        assert_eq!(bins(&dominant_peaks(&spectrum, 3)), vec![1, 3, 0]);
    }

    #[test]
    fn test_dominant_peaks_short_and_empty() {
        assert!(dominant_peaks(&[], 3).is_empty());
        assert_eq!(bins(&dominant_peaks(&[0.5, 0.7], 3)), vec![1, 0]);
        assert!(dominant_peaks(&[0.5, 0.7], 0).is_empty());
    }

    #[test]
    fn test_dominant_peaks_non_finite_as_zero() {
        let peaks = dominant_peaks(&[f64::NAN, f64::INFINITY, 0.2], 3);
        assert_eq!(bins(&peaks), vec![2, 0, 1]);
        assert_eq!(peaks[1].magnitude, 0.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.234_567_89, 5), 1.234_57);
        assert_eq!(round_to(0.000_004, 5), 0.0);
        assert_eq!(round_to(2.5, 0), 3.0);
    }
}
