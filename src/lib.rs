//! daq-core: per-event waveform analysis for detector DAQ monitoring
//!
//! This library ingests per-channel digitized waveforms once per detector
//! readout and derives, per channel, a baseline level, a frequency-domain
//! transform, a list of signal peaks, and a noise characterization, followed
//! by cross-channel noise correlation statistics. It features:
//!
//! - Bounded-memory approximate mode baseline estimation (FREQUENT)
//! - Reusable frequency-transform buffers sized on demand
//! - Threshold/smoothing based peak extraction
//! - Noise RMS, correlation, and summed-RMS over signal-free tick ranges
//! - Pluggable reporting sinks, with optional Redis telemetry
//!
//! # Quick Start
//!
//! ```rust
//! use daq_core::analysis::{ChannelReadout, EventAggregator};
//! use daq_core::config::AnalysisConfig;
//! use daq_core::report::MemoryRecordStore;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AnalysisConfig {
//!         n_channels: 4,
//!         ..AnalysisConfig::default()
//!     };
//!     let mut aggregator = EventAggregator::new(config)?;
//!     aggregator.add_sink(Box::new(MemoryRecordStore::new()));
//!
//!     // one event: four flat channels
//!     let readouts: Vec<ChannelReadout> = (0..4)
//!         .map(|channel| ChannelReadout::new(channel, vec![100; 1000]))
//!         .collect();
//!     let records = aggregator.process_event(&readouts);
//!     assert_eq!(records[0].baseline, 100.0);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod report;

// Re-export commonly used types for convenience
pub use analysis::{
    BaselineEstimator, ChannelPipeline, ChannelReadout, ChannelRecord, EventAggregator,
    NoiseModel, NoiseRange, Peak, PeakDetector, SpectralTransform,
};
pub use config::{AnalysisConfig, ConfigLoader, NoiseSamplingMode};
pub use error::{AnalysisError, AnalysisResult};
pub use report::{EventSink, JsonLinesStore, MemoryRecordStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "daq-core");
    }
}
