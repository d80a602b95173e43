// src/analysis/record.rs
//! Per-channel input and output records.

use crate::analysis::noise::NoiseRange;
use crate::analysis::peaks::Peak;
use serde::{Deserialize, Serialize};

/// One channel's raw digitized samples for one event, as supplied by the
/// readout harness. Treated as read-only for the duration of the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelReadout {
    /// Raw channel identifier.
    pub channel: usize,
    /// ADC counts, one per tick.
    pub adcs: Vec<i16>,
}

impl ChannelReadout {
    /// Create a readout.
    pub fn new(channel: usize, adcs: Vec<i16>) -> Self {
        Self { channel, adcs }
    }
}

/// Everything derived from one channel in one event.
///
/// Records are owned by the event's processing pass: they are reset at the
/// start of the next event and never retain sample data across events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelRecord {
    /// Channel identifier, dense over `[0, n_channels)`.
    pub channel: usize,
    /// Waveform samples as floating point values.
    pub waveform: Vec<f64>,
    /// Baseline estimate (approximate mode of the samples).
    pub baseline: f64,
    /// Real components of the frequency bins.
    pub fft_real: Vec<f64>,
    /// Imaginary components of the frequency bins, same length as
    /// `fft_real`.
    pub fft_imag: Vec<f64>,
    /// Detected peaks, ordered by start tick.
    pub peaks: Vec<Peak>,
    /// Noise RMS over the noise sample ranges.
    pub rms: f64,
    /// Tick ranges the noise statistics were measured over.
    pub noise_ranges: Vec<NoiseRange>,
    /// Smallest sample value.
    pub min: f64,
    /// Largest sample value.
    pub max: f64,
    /// Noise correlation against the previous channel in circular order.
    pub prev_channel_correlation: f64,
    /// Noise correlation against the next channel in circular order.
    pub next_channel_correlation: f64,
    /// Summed-waveform RMS against the previous channel.
    pub prev_channel_sum_rms: f64,
    /// Summed-waveform RMS against the next channel.
    pub next_channel_sum_rms: f64,
}

impl ChannelRecord {
    /// A zeroed record stamped with its channel identifier.
    pub fn empty(channel: usize) -> Self {
        Self {
            channel,
            ..Self::default()
        }
    }

    /// Reset to the zeroed state, keeping the channel identifier.
    pub fn clear(&mut self) {
        *self = Self::empty(self.channel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_keeps_channel_id() {
        let mut record = ChannelRecord::empty(7);
        record.waveform = vec![1.0, 2.0];
        record.rms = 3.5;

        record.clear();
        assert_eq!(record.channel, 7);
        assert!(record.waveform.is_empty());
        assert_eq!(record.rms, 0.0);
    }

    #[test]
    fn test_record_serializes_to_json() {
        let mut record = ChannelRecord::empty(2);
        record.baseline = 100.0;
        record.peaks.push(Peak {
            start: 10,
            end: 12,
            amplitude: 250.0,
        });
        record.noise_ranges.push(NoiseRange::new(0, 19));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["channel"], 2);
        assert_eq!(json["baseline"], 100.0);
        assert_eq!(json["peaks"][0]["start"], 10);
        assert_eq!(json["noise_ranges"][0]["end"], 19);
    }
}
