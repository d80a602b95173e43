// src/error.rs
//! Unified error type for the analysis core.
//!
//! The taxonomy mirrors how failures are allowed to propagate: configuration
//! problems are fatal at startup, processing problems surface from component
//! contracts (never across the per-event boundary), and sink problems are
//! reported by the aggregator but never fail an event.

use thiserror::Error;

/// Errors produced by the waveform analysis core.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Invalid configuration, detected before any event is processed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A component contract was violated (e.g. an empty waveform was passed
    /// where a non-empty one is required).
    #[error("{component}: {reason}")]
    Processing {
        /// Component that rejected the input.
        component: &'static str,
        /// Human-readable cause.
        reason: String,
    },

    /// A reporting sink failed to deliver an event record set.
    #[error("sink '{sink}' failed: {reason}")]
    Sink {
        /// Sink identifier, as returned by `EventSink::name`.
        sink: &'static str,
        /// Human-readable cause.
        reason: String,
    },
}

impl AnalysisError {
    pub(crate) fn processing(component: &'static str, reason: impl Into<String>) -> Self {
        AnalysisError::Processing {
            component,
            reason: reason.into(),
        }
    }

    pub(crate) fn sink(sink: &'static str, reason: impl Into<String>) -> Self {
        AnalysisError::Sink {
            sink,
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
