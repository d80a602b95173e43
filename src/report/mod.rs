// src/report/mod.rs
//! Reporting sinks for completed per-event record sets.
//!
//! The aggregator hands every sink a fully-formed record set after both
//! analysis passes; a sink never sees a partial event. Sink failures are
//! logged by the aggregator and never fail event processing.

#[cfg(feature = "telemetry")]
pub mod telemetry;

#[cfg(feature = "telemetry")]
pub use telemetry::RedisTelemetry;

use crate::analysis::record::ChannelRecord;
use crate::error::{AnalysisError, AnalysisResult};
use std::io::Write;

/// Receives the complete record set of one event.
pub trait EventSink: Send {
    /// Sink identifier used in delivery-failure logs.
    fn name(&self) -> &'static str;

    /// Deliver one event's record set. `event_index` counts processed
    /// events starting at 1.
    fn report(&mut self, event_index: u64, records: &[ChannelRecord]) -> AnalysisResult<()>;
}

/// Append-only in-memory record store, one entry per event.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    events: Vec<Vec<ChannelRecord>>,
}

impl MemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events stored.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no event has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Stored record sets, in event order.
    pub fn events(&self) -> &[Vec<ChannelRecord>] {
        &self.events
    }
}

impl EventSink for MemoryRecordStore {
    fn name(&self) -> &'static str {
        "memory_store"
    }

    fn report(&mut self, _event_index: u64, records: &[ChannelRecord]) -> AnalysisResult<()> {
        self.events.push(records.to_vec());
        Ok(())
    }
}

/// Writes one JSON line per event to the wrapped writer, append-only.
pub struct JsonLinesStore<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> JsonLinesStore<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the store, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> EventSink for JsonLinesStore<W> {
    fn name(&self) -> &'static str {
        "json_lines_store"
    }

    fn report(&mut self, event_index: u64, records: &[ChannelRecord]) -> AnalysisResult<()> {
        let line = serde_json::json!({
            "event": event_index,
            "channels": records,
        });
        serde_json::to_writer(&mut self.writer, &line)
            .map_err(|err| AnalysisError::sink("json_lines_store", err.to_string()))?;
        self.writer
            .write_all(b"\n")
            .map_err(|err| AnalysisError::sink("json_lines_store", err.to_string()))?;
        Ok(())
    }
}
