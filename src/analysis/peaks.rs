// src/analysis/peaks.rs
//! Threshold-based peak extraction from a smoothed waveform.

use serde::{Deserialize, Serialize};

/// A contiguous run of ticks where the smoothed, baseline-subtracted
/// waveform stays outside the threshold band. Tick bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    /// First tick of the excursion.
    pub start: usize,
    /// Last tick of the excursion (inclusive).
    pub end: usize,
    /// Smoothed, baseline-subtracted value at the extremum tick: the maximum
    /// for a positive excursion, the minimum for a negative one.
    pub amplitude: f64,
}

/// Finds threshold crossings in a baseline-referenced waveform.
#[derive(Debug, Clone, Copy)]
pub struct PeakDetector {
    smoothing_window: usize,
    threshold_hi: f64,
    threshold_lo: f64,
}

impl PeakDetector {
    /// Create a detector.
    ///
    /// `smoothing_window` is the number of neighbors averaged on each side of
    /// a tick. A `threshold_lo` at or above zero disables negative-peak
    /// detection (a lower threshold above the baseline is meaningless).
    pub fn new(smoothing_window: usize, threshold_hi: f64, threshold_lo: f64) -> Self {
        Self {
            smoothing_window,
            threshold_hi,
            threshold_lo,
        }
    }

    fn negative_peaks_enabled(&self) -> bool {
        self.threshold_lo < 0.0
    }

    /// Extract peaks from `waveform`, using `baseline` as the reference
    /// level.
    ///
    /// A peak opens at the first tick whose smoothed, baseline-subtracted
    /// value leaves the `[threshold_lo, threshold_hi]` band and closes at the
    /// first tick back inside the band, or at the waveform end. Consecutive
    /// qualifying ticks merge into one peak. Peaks come out ordered by start
    /// tick and never overlap.
    pub fn find_peaks(&self, waveform: &[f64], baseline: f64) -> Vec<Peak> {
        let mut peaks = Vec::new();
        let mut open: Option<Peak> = None;

        for i in 0..waveform.len() {
            let value = self.smoothed(waveform, i) - baseline;
            let qualifies = value > self.threshold_hi
                || (self.negative_peaks_enabled() && value < self.threshold_lo);

            match (&mut open, qualifies) {
                (None, true) => {
                    open = Some(Peak {
                        start: i,
                        end: i,
                        amplitude: value,
                    });
                }
                (Some(peak), true) => {
                    peak.end = i;
                    if value.abs() > peak.amplitude.abs() {
                        peak.amplitude = value;
                    }
                }
                (Some(peak), false) => {
                    peaks.push(*peak);
                    open = None;
                }
                (None, false) => {}
            }
        }
        // a peak touching the waveform end closes at the boundary
        if let Some(peak) = open {
            peaks.push(peak);
        }
        peaks
    }

    /// Average of the samples within `smoothing_window` ticks of `i`. The
    /// window is truncated at the waveform boundaries, not wrapped or padded.
    fn smoothed(&self, waveform: &[f64], i: usize) -> f64 {
        let lo = i.saturating_sub(self.smoothing_window);
        let hi = (i + self.smoothing_window).min(waveform.len() - 1);
        let window = &waveform[lo..=hi];
        window.iter().sum::<f64>() / window.len() as f64
    }
}
