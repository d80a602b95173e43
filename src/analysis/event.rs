// src/analysis/event.rs
//! Event-level orchestration: per-channel pass, cross-channel pass,
//! reporting.

use crate::analysis::noise::NoiseModel;
use crate::analysis::pipeline::ChannelPipeline;
use crate::analysis::record::{ChannelReadout, ChannelRecord};
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, AnalysisResult};
use crate::report::EventSink;
use tracing::{debug, info, warn};

/// Drives the full analysis of one event across all configured channels.
///
/// Processing is two-phase: an independent per-channel pass, then a
/// cross-channel pass over each channel's circular neighbors. The second
/// pass requires every channel's first-pass output, so it runs only after
/// the first completes. Reporting happens last; sinks receive a fully
/// formed record set or nothing.
pub struct EventAggregator {
    config: AnalysisConfig,
    pipeline: ChannelPipeline,
    records: Vec<ChannelRecord>,
    noise: Vec<NoiseModel>,
    sinks: Vec<Box<dyn EventSink>>,
    event_index: u64,
}

impl EventAggregator {
    /// Build an aggregator from a validated configuration.
    ///
    /// Configuration errors are fatal here: no event may be processed with
    /// an invalid configuration.
    pub fn new(config: AnalysisConfig) -> AnalysisResult<Self> {
        config
            .validate()
            .map_err(|errors| AnalysisError::Config(errors.join("; ")))?;

        let records = (0..config.n_channels).map(ChannelRecord::empty).collect();
        let noise = vec![NoiseModel::default(); config.n_channels];
        Ok(Self {
            pipeline: ChannelPipeline::new(&config),
            records,
            noise,
            sinks: Vec::new(),
            event_index: 0,
            config,
        })
    }

    /// Attach a reporting sink. Sinks are invoked in attachment order.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Number of events processed so far.
    pub fn events_processed(&self) -> u64 {
        self.event_index
    }

    /// Process one event's readouts and report the results.
    ///
    /// Readouts with a channel identifier at or beyond the configured
    /// channel count are silently skipped: multiplexed inputs may carry
    /// channels outside the analysis scope. Channels with no readout in
    /// this event keep zeroed records. Returns the per-channel records for
    /// inspection; they are valid until the next call.
    pub fn process_event(&mut self, readouts: &[ChannelReadout]) -> &[ChannelRecord] {
        self.event_index += 1;

        // clear out containers from the last event
        for record in self.records.iter_mut() {
            record.clear();
        }
        for noise in self.noise.iter_mut() {
            *noise = NoiseModel::default();
        }

        // first pass: channels are independent
        for readout in readouts {
            let channel = readout.channel;
            if channel >= self.config.n_channels {
                debug!(channel, "skipping channel outside analysis scope");
                continue;
            }
            self.noise[channel] = self.pipeline.process(readout, &mut self.records[channel]);
        }

        // second pass: cross-channel statistics over circular neighbors.
        // Needs every channel's noise model, hence the barrier above.
        let n = self.config.n_channels;
        for i in 0..n {
            let prev = if i == 0 { n - 1 } else { i - 1 };
            let next = if i == n - 1 { 0 } else { i + 1 };

            self.records[i].prev_channel_correlation = self.noise[i].correlation(
                &self.records[i].waveform,
                &self.noise[prev],
                &self.records[prev].waveform,
            );
            self.records[i].next_channel_correlation = self.noise[i].correlation(
                &self.records[i].waveform,
                &self.noise[next],
                &self.records[next].waveform,
            );
            self.records[i].prev_channel_sum_rms = self.noise[i].sum_rms(
                &self.records[i].waveform,
                &self.noise[prev],
                &self.records[prev].waveform,
            );
            self.records[i].next_channel_sum_rms = self.noise[i].sum_rms(
                &self.records[i].waveform,
                &self.noise[next],
                &self.records[next].waveform,
            );
        }

        self.report_event();
        &self.records
    }

    /// Dispatch the completed record set to every sink and emit logging.
    fn report_event(&mut self) {
        info!(
            event = self.event_index,
            producer = %self.config.producer_name,
            channels = self.records.len(),
            "event analyzed"
        );

        if self.config.verbose {
            for record in &self.records {
                match serde_json::to_string_pretty(record) {
                    Ok(json) => debug!(channel = record.channel, "{}", json),
                    Err(err) => warn!(channel = record.channel, %err, "record not serializable"),
                }
            }
        }

        // delivery failures never fail the event
        for sink in self.sinks.iter_mut() {
            if let Err(err) = sink.report(self.event_index, &self.records) {
                warn!(sink = sink.name(), %err, "event delivery failed");
            }
        }
    }
}
