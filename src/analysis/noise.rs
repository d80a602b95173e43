// src/analysis/noise.rs
//! Noise characterization over signal-free tick ranges.
//!
//! A [`NoiseModel`] holds the tick ranges of a waveform believed to contain
//! no signal, either a fixed leading window or the complement of the
//! detected peaks. Restricting the statistics to those ranges keeps genuine
//! hits from inflating the RMS, while the cross-channel operations
//! (correlation, summed RMS) expose common-mode noise between channels.

use crate::analysis::peaks::Peak;
use serde::{Deserialize, Serialize};

/// A tick interval believed to contain no signal. Both bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoiseRange {
    /// First tick of the interval.
    pub start: usize,
    /// Last tick of the interval (inclusive).
    pub end: usize,
}

impl NoiseRange {
    /// Create a range over `[start, end]`.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Noise sample ranges plus the baseline they are measured against.
#[derive(Debug, Clone, Default)]
pub struct NoiseModel {
    ranges: Vec<NoiseRange>,
    baseline: f64,
}

impl NoiseModel {
    /// Build a model from an explicit range list.
    pub fn new(ranges: Vec<NoiseRange>, baseline: f64) -> Self {
        Self { ranges, baseline }
    }

    /// Build a model from the complement of the peak-covered ticks of a
    /// waveform of `n_ticks` samples.
    ///
    /// Peaks must be ordered by start tick and non-overlapping, as produced
    /// by the peak detector; spans are clamped to the waveform bounds. When
    /// the peaks cover the whole waveform the full waveform is used instead,
    /// so the model always has something to measure (this biases the RMS
    /// upward for such channels, a behavior kept from the original
    /// analysis).
    pub fn from_peaks(peaks: &[Peak], baseline: f64, n_ticks: usize) -> Self {
        if n_ticks == 0 {
            return Self::new(Vec::new(), baseline);
        }

        let mut ranges = Vec::new();
        let mut cursor = 0usize;
        for peak in peaks {
            let start = peak.start.min(n_ticks);
            if start > cursor {
                ranges.push(NoiseRange::new(cursor, start - 1));
            }
            cursor = cursor.max(peak.end.saturating_add(1)).min(n_ticks);
        }
        if cursor < n_ticks {
            ranges.push(NoiseRange::new(cursor, n_ticks - 1));
        }

        if ranges.is_empty() {
            ranges.push(NoiseRange::new(0, n_ticks - 1));
        }
        Self::new(ranges, baseline)
    }

    /// The noise sample ranges, ordered by start tick.
    pub fn ranges(&self) -> &[NoiseRange] {
        &self.ranges
    }

    /// Baseline the ranges are measured against.
    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    /// Root-mean-square of the baseline-subtracted samples inside the noise
    /// ranges. Returns 0 for an empty waveform or an empty range set.
    pub fn rms(&self, waveform: &[f64]) -> f64 {
        let mut sum_sq = 0.0;
        let mut count = 0usize;
        for tick in self.ticks_within(waveform.len()) {
            let value = waveform[tick] - self.baseline;
            sum_sq += value * value;
            count += 1;
        }
        if count == 0 {
            return 0.0;
        }
        (sum_sq / count as f64).sqrt()
    }

    /// Pearson-style correlation of two channels' baseline-subtracted
    /// samples over the intersection of their noise ranges.
    ///
    /// Returns 0 when the intersection is empty or either channel has zero
    /// variance there; a cross-channel comparison must never abort an event.
    pub fn correlation(
        &self,
        waveform: &[f64],
        other: &NoiseModel,
        other_waveform: &[f64],
    ) -> f64 {
        let mut sum_aa = 0.0;
        let mut sum_bb = 0.0;
        let mut sum_ab = 0.0;
        for tick in self.shared_ticks(waveform.len(), other, other_waveform.len()) {
            let a = waveform[tick] - self.baseline;
            let b = other_waveform[tick] - other.baseline;
            sum_aa += a * a;
            sum_bb += b * b;
            sum_ab += a * b;
        }
        let denominator = (sum_aa * sum_bb).sqrt();
        if denominator == 0.0 {
            return 0.0;
        }
        sum_ab / denominator
    }

    /// RMS of the tick-wise sum of two channels' baseline-subtracted
    /// samples over the intersection of their noise ranges.
    ///
    /// Coherent noise adds in amplitude (up to twice the single-channel
    /// RMS); incoherent noise adds in quadrature. Returns 0 when the
    /// intersection is empty.
    pub fn sum_rms(&self, waveform: &[f64], other: &NoiseModel, other_waveform: &[f64]) -> f64 {
        let mut sum_sq = 0.0;
        let mut count = 0usize;
        for tick in self.shared_ticks(waveform.len(), other, other_waveform.len()) {
            let summed =
                (waveform[tick] - self.baseline) + (other_waveform[tick] - other.baseline);
            sum_sq += summed * summed;
            count += 1;
        }
        if count == 0 {
            return 0.0;
        }
        (sum_sq / count as f64).sqrt()
    }

    /// Ticks covered by this model's ranges, clamped to `len`.
    fn ticks_within(&self, len: usize) -> impl Iterator<Item = usize> + '_ {
        self.ranges
            .iter()
            .flat_map(move |range| range.start..=range.end.min(len.saturating_sub(1)))
            .filter(move |&tick| tick < len)
    }

    /// Ticks in the intersection of both models' ranges, clamped to both
    /// waveform lengths.
    fn shared_ticks<'a>(
        &'a self,
        len: usize,
        other: &'a NoiseModel,
        other_len: usize,
    ) -> impl Iterator<Item = usize> + 'a {
        let limit = len.min(other_len);
        self.ticks_within(limit)
            .filter(move |&tick| other.covers(tick))
    }

    fn covers(&self, tick: usize) -> bool {
        self.ranges
            .iter()
            .any(|range| tick >= range.start && tick <= range.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn waveform_with_noise(baseline: f64, pattern: &[f64], n: usize) -> Vec<f64> {
        (0..n).map(|i| baseline + pattern[i % pattern.len()]).collect()
    }

    #[test]
    fn test_rms_on_empty_range_set_is_zero() {
        let model = NoiseModel::new(Vec::new(), 100.0);
        assert_eq!(model.rms(&[105.0; 50]), 0.0);
    }

    #[test]
    fn test_rms_on_empty_waveform_is_zero() {
        let model = NoiseModel::new(vec![NoiseRange::new(0, 19)], 100.0);
        assert_eq!(model.rms(&[]), 0.0);
    }

    #[test]
    fn test_rms_of_flat_waveform_is_zero() {
        let model = NoiseModel::new(vec![NoiseRange::new(0, 19)], 100.0);
        assert_eq!(model.rms(&[100.0; 100]), 0.0);
    }

    #[test]
    fn test_rms_restricted_to_ranges() {
        // baseline offset of +3 over the first 10 ticks, garbage after
        let mut waveform = vec![103.0; 10];
        waveform.extend(vec![1000.0; 90]);

        let model = NoiseModel::new(vec![NoiseRange::new(0, 9)], 100.0);
        assert!((model.rms(&waveform) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_ranges_clamped_to_waveform() {
        let model = NoiseModel::new(vec![NoiseRange::new(0, 999)], 0.0);
        // waveform shorter than the range: only the real ticks count
        assert!((model.rms(&[2.0; 10]) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_peaks_complement() {
        let peaks = vec![
            Peak { start: 10, end: 19, amplitude: 500.0 },
            Peak { start: 40, end: 49, amplitude: 300.0 },
        ];
        let model = NoiseModel::from_peaks(&peaks, 100.0, 60);

        assert_eq!(
            model.ranges(),
            &[
                NoiseRange::new(0, 9),
                NoiseRange::new(20, 39),
                NoiseRange::new(50, 59),
            ]
        );
    }

    #[test]
    fn test_from_peaks_leading_peak() {
        let peaks = vec![Peak { start: 0, end: 9, amplitude: 500.0 }];
        let model = NoiseModel::from_peaks(&peaks, 0.0, 30);
        assert_eq!(model.ranges(), &[NoiseRange::new(10, 29)]);
    }

    #[test]
    fn test_from_peaks_full_coverage_falls_back_to_whole_waveform() {
        let peaks = vec![Peak { start: 0, end: 99, amplitude: 500.0 }];
        let model = NoiseModel::from_peaks(&peaks, 0.0, 100);
        assert_eq!(model.ranges(), &[NoiseRange::new(0, 99)]);
    }

    #[test]
    fn test_from_peaks_no_peaks_uses_whole_waveform() {
        let model = NoiseModel::from_peaks(&[], 0.0, 100);
        assert_eq!(model.ranges(), &[NoiseRange::new(0, 99)]);
    }

    #[test]
    fn test_correlation_of_identical_channels_is_one() {
        let waveform = waveform_with_noise(100.0, &[1.0, -2.0, 0.5, -1.5, 2.0], 200);
        let model_a = NoiseModel::new(vec![NoiseRange::new(0, 199)], 100.0);
        let model_b = model_a.clone();

        let rho = model_a.correlation(&waveform, &model_b, &waveform);
        assert!((rho - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_of_inverted_channels_is_minus_one() {
        let waveform = waveform_with_noise(0.0, &[1.0, -2.0, 0.5], 90);
        let inverted: Vec<f64> = waveform.iter().map(|x| -x).collect();
        let model = NoiseModel::new(vec![NoiseRange::new(0, 89)], 0.0);

        let rho = model.correlation(&waveform, &model.clone(), &inverted);
        assert!((rho + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_empty_intersection_is_zero() {
        let model_a = NoiseModel::new(vec![NoiseRange::new(0, 9)], 0.0);
        let model_b = NoiseModel::new(vec![NoiseRange::new(50, 59)], 0.0);
        let waveform = vec![1.0; 100];

        assert_eq!(model_a.correlation(&waveform, &model_b, &waveform), 0.0);
        assert_eq!(model_a.sum_rms(&waveform, &model_b, &waveform), 0.0);
    }

    #[test]
    fn test_correlation_zero_variance_is_zero() {
        let model = NoiseModel::new(vec![NoiseRange::new(0, 49)], 100.0);
        let flat = vec![100.0; 50];
        let noisy = waveform_with_noise(100.0, &[1.0, -1.0], 50);

        assert_eq!(model.correlation(&flat, &model.clone(), &noisy), 0.0);
    }

    #[test]
    fn test_cross_channel_metrics_are_symmetric() {
        let wf_a = waveform_with_noise(100.0, &[1.0, -2.0, 0.5, 3.0], 120);
        let wf_b = waveform_with_noise(98.0, &[-1.0, 2.5, 0.0, -0.5], 120);
        let model_a = NoiseModel::new(vec![NoiseRange::new(0, 79)], 100.0);
        let model_b = NoiseModel::new(vec![NoiseRange::new(40, 119)], 98.0);

        let rho_ab = model_a.correlation(&wf_a, &model_b, &wf_b);
        let rho_ba = model_b.correlation(&wf_b, &model_a, &wf_a);
        assert!((rho_ab - rho_ba).abs() < 1e-12);

        let sum_ab = model_a.sum_rms(&wf_a, &model_b, &wf_b);
        let sum_ba = model_b.sum_rms(&wf_b, &model_a, &wf_a);
        assert!((sum_ab - sum_ba).abs() < 1e-12);
    }

    #[test]
    fn test_sum_rms_of_identical_channels_doubles() {
        let waveform = waveform_with_noise(100.0, &[2.0, -2.0], 100);
        let model = NoiseModel::new(vec![NoiseRange::new(0, 99)], 100.0);

        let single = model.rms(&waveform);
        let summed = model.sum_rms(&waveform, &model.clone(), &waveform);
        assert!((summed - 2.0 * single).abs() < 1e-9);
    }
}
