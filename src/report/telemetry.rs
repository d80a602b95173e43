// src/report/telemetry.rs
//! Redis-backed telemetry push of per-event summaries.
//!
//! Delivery is fire-and-forget from the pipeline's point of view: any error
//! returned here is logged by the aggregator and never halts event
//! processing.

use crate::analysis::record::ChannelRecord;
use crate::error::{AnalysisError, AnalysisResult};
use crate::report::EventSink;
use redis::Commands;

const SINK_NAME: &str = "redis_telemetry";

/// Pushes one serialized record set per event onto a Redis list.
pub struct RedisTelemetry {
    connection: redis::Connection,
    key: String,
}

impl RedisTelemetry {
    /// Connect to the monitoring Redis instance.
    ///
    /// `key` is the list the per-event payloads are appended to, e.g.
    /// `"daq:events"`.
    pub fn connect(url: &str, key: impl Into<String>) -> AnalysisResult<Self> {
        let client = redis::Client::open(url)
            .map_err(|err| AnalysisError::sink(SINK_NAME, err.to_string()))?;
        let connection = client
            .get_connection()
            .map_err(|err| AnalysisError::sink(SINK_NAME, err.to_string()))?;
        Ok(Self {
            connection,
            key: key.into(),
        })
    }
}

impl EventSink for RedisTelemetry {
    fn name(&self) -> &'static str {
        SINK_NAME
    }

    fn report(&mut self, event_index: u64, records: &[ChannelRecord]) -> AnalysisResult<()> {
        let payload = serde_json::json!({
            "event": event_index,
            "channels": records,
        });
        let serialized = serde_json::to_string(&payload)
            .map_err(|err| AnalysisError::sink(SINK_NAME, err.to_string()))?;
        self.connection
            .rpush::<_, _, ()>(&self.key, serialized)
            .map_err(|err| AnalysisError::sink(SINK_NAME, err.to_string()))?;
        Ok(())
    }
}
