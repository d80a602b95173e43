// src/config/mod.rs
//! Analysis configuration, loaded once at startup and immutable thereafter.

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};

use serde::{Deserialize, Serialize};

/// How noise sample ranges are chosen for each channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum NoiseSamplingMode {
    /// Use the first `n_noise_samples` ticks of every waveform.
    FixedWindow,
    /// Use the complement of the detected peak ranges.
    PeakComplement,
}

impl TryFrom<u8> for NoiseSamplingMode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(NoiseSamplingMode::FixedWindow),
            1 => Ok(NoiseSamplingMode::PeakComplement),
            other => Err(format!(
                "invalid noise_range_sampling {} (expected 0 or 1)",
                other
            )),
        }
    }
}

impl From<NoiseSamplingMode> for u8 {
    fn from(mode: NoiseSamplingMode) -> u8 {
        match mode {
            NoiseSamplingMode::FixedWindow => 0,
            NoiseSamplingMode::PeakComplement => 1,
        }
    }
}

/// Complete analysis configuration.
///
/// Every component receives a reference to this at construction; there is no
/// mutable global state. Fields map one-to-one onto the recognized
/// configuration surface of the DAQ harness.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AnalysisConfig {
    /// Conversion of frame number to time in seconds. Informational only.
    #[serde(default = "defaults::frame_to_dt")]
    pub frame_to_dt: f64,

    /// Pretty-print each channel record after every event.
    #[serde(default = "defaults::verbose")]
    pub verbose: bool,

    /// Number of events to take in before exiting. Negative means unbounded.
    /// Informational only; the cap is not enforced by the core.
    #[serde(default = "defaults::n_events")]
    pub n_events: i64,

    /// Upper threshold for peak finding, relative to the baseline.
    #[serde(default = "defaults::threshold_hi")]
    pub threshold_hi: f64,

    /// Lower threshold for peak finding, relative to the baseline.
    /// Values at or above zero disable negative-peak detection.
    #[serde(default = "defaults::threshold_lo")]
    pub threshold_lo: f64,

    /// How noise sample ranges are chosen (0 = fixed window, 1 = peaks).
    #[serde(default = "defaults::noise_range_sampling")]
    pub noise_range_sampling: NoiseSamplingMode,

    /// Number of leading ticks in the noise sample. Only used in
    /// fixed-window mode.
    #[serde(default = "defaults::n_noise_samples")]
    pub n_noise_samples: usize,

    /// Number of samples to average in each direction when smoothing for
    /// peak finding.
    #[serde(default = "defaults::n_smoothing_samples")]
    pub n_smoothing_samples: usize,

    /// Number of ADC counts per waveform, if known ahead of time. Setting a
    /// positive value lets the spectral buffers be sized once for the whole
    /// run; non-positive means detect per channel.
    #[serde(default = "defaults::static_input_size")]
    pub static_input_size: i64,

    /// Whether to push per-event summaries to the monitoring service.
    #[serde(default = "defaults::telemetry", alias = "redis")]
    pub telemetry: bool,

    /// Number of input channels under analysis.
    #[serde(default = "defaults::n_channels")]
    pub n_channels: usize,

    /// Name of the upstream producer of raw digits.
    #[serde(default = "defaults::producer_name")]
    pub producer_name: String,
}

/// Default value providers, kept together so the TOML surface and
/// `Default` never drift apart.
mod defaults {
    pub fn frame_to_dt() -> f64 {
        1.6e-3
    }
    pub fn verbose() -> bool {
        false
    }
    pub fn n_events() -> i64 {
        -1
    }
    pub fn threshold_hi() -> f64 {
        100.0
    }
    pub fn threshold_lo() -> f64 {
        -1.0
    }
    pub fn noise_range_sampling() -> super::NoiseSamplingMode {
        super::NoiseSamplingMode::FixedWindow
    }
    pub fn n_noise_samples() -> usize {
        20
    }
    pub fn n_smoothing_samples() -> usize {
        1
    }
    pub fn static_input_size() -> i64 {
        -1
    }
    pub fn telemetry() -> bool {
        false
    }
    pub fn n_channels() -> usize {
        16
    }
    pub fn producer_name() -> String {
        "daq".to_string()
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            frame_to_dt: defaults::frame_to_dt(),
            verbose: defaults::verbose(),
            n_events: defaults::n_events(),
            threshold_hi: defaults::threshold_hi(),
            threshold_lo: defaults::threshold_lo(),
            noise_range_sampling: defaults::noise_range_sampling(),
            n_noise_samples: defaults::n_noise_samples(),
            n_smoothing_samples: defaults::n_smoothing_samples(),
            static_input_size: defaults::static_input_size(),
            telemetry: defaults::telemetry(),
            n_channels: defaults::n_channels(),
            producer_name: defaults::producer_name(),
        }
    }
}

impl AnalysisConfig {
    /// Validate configuration consistency.
    ///
    /// Collects every problem rather than stopping at the first, so a bad
    /// configuration file can be fixed in one round trip. A failure here is
    /// fatal: no event may be processed with an invalid configuration.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.n_channels == 0 {
            errors.push("n_channels must be positive".to_string());
        }

        if !self.threshold_hi.is_finite() || self.threshold_hi <= 0.0 {
            errors.push(format!(
                "threshold_hi must be positive and finite, got {}",
                self.threshold_hi
            ));
        }

        if !self.threshold_lo.is_finite() {
            errors.push(format!("threshold_lo must be finite, got {}", self.threshold_lo));
        }

        if self.noise_range_sampling == NoiseSamplingMode::FixedWindow && self.n_noise_samples == 0
        {
            errors.push("n_noise_samples must be positive in fixed-window mode".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Statically configured spectral buffer size, if any.
    pub fn static_input_size(&self) -> Option<usize> {
        (self.static_input_size > 0).then_some(self.static_input_size as usize)
    }
}
