// src/analysis/pipeline.rs
//! Per-channel analysis pipeline.
//!
//! Orchestrates, for one channel of one event: waveform copy with min/max
//! tracking, baseline estimation, the frequency transform, peak detection,
//! and noise-range construction. Channels are independent of one another;
//! the cross-channel pass lives in [`crate::analysis::event`].

use crate::analysis::baseline::BaselineEstimator;
use crate::analysis::noise::{NoiseModel, NoiseRange};
use crate::analysis::peaks::PeakDetector;
use crate::analysis::record::{ChannelReadout, ChannelRecord};
use crate::analysis::spectral::SpectralTransform;
use crate::config::{AnalysisConfig, NoiseSamplingMode};
use tracing::warn;

/// Drives the per-channel stages and populates a [`ChannelRecord`].
///
/// Owns the spectral transform exclusively: its buffers are reused across
/// channels within an event (and across events when `static_input_size` is
/// configured), so a pipeline must not be shared between concurrently
/// processed channels.
pub struct ChannelPipeline {
    baseline: BaselineEstimator,
    detector: PeakDetector,
    transform: SpectralTransform,
    noise_mode: NoiseSamplingMode,
    n_noise_samples: usize,
}

impl ChannelPipeline {
    /// Build a pipeline from the process-wide configuration.
    pub fn new(config: &AnalysisConfig) -> Self {
        let transform = match config.static_input_size() {
            Some(n) => SpectralTransform::with_input_size(n),
            None => SpectralTransform::new(),
        };
        Self {
            baseline: BaselineEstimator::new(),
            detector: PeakDetector::new(
                config.n_smoothing_samples,
                config.threshold_hi,
                config.threshold_lo,
            ),
            transform,
            noise_mode: config.noise_range_sampling,
            n_noise_samples: config.n_noise_samples,
        }
    }

    /// Analyze one channel's readout into `record`, returning the channel's
    /// noise model for the cross-channel pass.
    ///
    /// A missing or empty waveform is a per-event data error: it is logged,
    /// the record is left zeroed, and an empty noise model is returned so
    /// the event continues for the other channels.
    pub fn process(&mut self, readout: &ChannelReadout, record: &mut ChannelRecord) -> NoiseModel {
        record.channel = readout.channel;

        if readout.adcs.is_empty() {
            warn!(channel = readout.channel, "empty waveform, leaving record zeroed");
            return NoiseModel::default();
        }

        let n_ticks = readout.adcs.len();
        self.transform.resize(n_ticks);

        let mut min = f64::MAX;
        let mut max = f64::MIN;
        record.waveform.reserve(n_ticks);
        for (i, &adc) in readout.adcs.iter().enumerate() {
            let sample = f64::from(adc);
            min = min.min(sample);
            max = max.max(sample);
            record.waveform.push(sample);
            self.transform.set_sample(i, sample);
        }
        record.min = min;
        record.max = max;

        // estimator never fails for a non-empty waveform
        record.baseline = match self.baseline.estimate(&readout.adcs) {
            Ok(mode) => f64::from(mode),
            Err(err) => {
                warn!(channel = readout.channel, %err, "baseline estimation failed");
                return NoiseModel::default();
            }
        };

        match self.transform.execute() {
            Ok(()) => {
                let n_bins = self.transform.output_len();
                record.fft_real.reserve(n_bins);
                record.fft_imag.reserve(n_bins);
                for i in 0..n_bins {
                    record.fft_real.push(self.transform.real(i));
                    record.fft_imag.push(self.transform.imag(i));
                }
            }
            Err(err) => {
                warn!(channel = readout.channel, %err, "frequency transform failed");
            }
        }

        record.peaks = self.detector.find_peaks(&record.waveform, record.baseline);

        let noise = match self.noise_mode {
            NoiseSamplingMode::FixedWindow => NoiseModel::new(
                vec![NoiseRange::new(0, self.n_noise_samples - 1)],
                record.baseline,
            ),
            NoiseSamplingMode::PeakComplement => {
                NoiseModel::from_peaks(&record.peaks, record.baseline, n_ticks)
            }
        };

        record.rms = noise.rms(&record.waveform);
        record.noise_ranges = noise.ranges().to_vec();
        noise
    }
}
