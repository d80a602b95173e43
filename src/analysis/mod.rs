// src/analysis/mod.rs
//! The waveform analysis pipeline.
//!
//! Leaves first: baseline estimation, the frequency transform, peak
//! detection, and noise modeling are independent components; the channel
//! pipeline composes them per channel and the event aggregator drives the
//! whole event including the cross-channel pass.

pub mod baseline;
pub mod event;
pub mod noise;
pub mod peaks;
pub mod pipeline;
pub mod record;
pub mod spectral;

pub use baseline::{BaselineEstimator, MODE_SLOTS};
pub use event::EventAggregator;
pub use noise::{NoiseModel, NoiseRange};
pub use peaks::{Peak, PeakDetector};
pub use pipeline::ChannelPipeline;
pub use record::{ChannelReadout, ChannelRecord};
pub use spectral::SpectralTransform;
