// src/analysis/baseline.rs
//! Baseline estimation via an approximate streaming mode.
//!
//! Uses the FREQUENT (Misra-Gries) majority-tracking scheme: a fixed array of
//! (value, count) slots is maintained over one pass of the waveform, so the
//! estimate costs O(n * K) time and O(K) space regardless of the ADC value
//! range. This runs once per channel per event at full tick rate, which rules
//! out building a full histogram.

use crate::error::{AnalysisError, AnalysisResult};

/// Number of counter slots. Ten slots track the mode reliably for waveforms
/// that are mostly baseline with sparse excursions.
pub const MODE_SLOTS: usize = 10;

/// Approximate mode estimator over integer ADC samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselineEstimator;

impl BaselineEstimator {
    /// Create a new estimator.
    pub fn new() -> Self {
        Self
    }

    /// Estimate the baseline of a waveform as its approximate mode.
    ///
    /// Returns an error for an empty waveform; never fails for any non-empty
    /// input. A constant waveform yields that constant exactly. When several
    /// slots end with the same maximum count the winner is the first such
    /// slot in array order, which depends on input order; callers must not
    /// rely on any particular tie-break.
    pub fn estimate(&self, samples: &[i16]) -> AnalysisResult<i16> {
        if samples.is_empty() {
            return Err(AnalysisError::processing(
                "baseline",
                "cannot estimate the baseline of an empty waveform",
            ));
        }

        let mut counters = [0u32; MODE_SLOTS];
        let mut values = [0i16; MODE_SLOTS];

        for &sample in samples {
            let mut home = None;
            // look for the slot already holding this value
            for i in 0..MODE_SLOTS {
                if counters[i] > 0 && values[i] == sample {
                    home = Some(i);
                    break;
                }
            }
            // otherwise claim a free slot
            if home.is_none() {
                for i in 0..MODE_SLOTS {
                    if counters[i] == 0 {
                        values[i] = sample;
                        home = Some(i);
                        break;
                    }
                }
            }
            match home {
                Some(i) => counters[i] += 1,
                // no slot available: decay every counter
                None => {
                    for counter in counters.iter_mut() {
                        *counter = counter.saturating_sub(1);
                    }
                }
            }
        }

        // the highest counter holds the mode estimate
        let mut best = 0;
        for i in 1..MODE_SLOTS {
            if counters[i] > counters[best] {
                best = i;
            }
        }
        Ok(values[best])
    }
}
