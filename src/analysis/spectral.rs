// src/analysis/spectral.rs
//! Reusable forward frequency transform over a resizable sample buffer.
//!
//! One instance owns its input/output buffers and a cached rustfft plan.
//! Resizing to the current length is a no-op, so channels of identical
//! length within an event (or a statically configured input size across
//! events) pay the allocation and planning cost only once.

use crate::error::{AnalysisError, AnalysisResult};
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// Forward real-to-complex transform with reusable buffers.
///
/// Not reentrant: `execute` works in place on the owned buffers, so an
/// instance must be exclusively owned by one pipeline.
pub struct SpectralTransform {
    planner: FftPlanner<f64>,
    plan: Option<Arc<dyn Fft<f64>>>,
    input: Vec<f64>,
    output: Vec<Complex<f64>>,
}

impl SpectralTransform {
    /// Create a transform with no allocated buffers.
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
            plan: None,
            input: Vec::new(),
            output: Vec::new(),
        }
    }

    /// Create a transform pre-sized for waveforms of `n` samples.
    pub fn with_input_size(n: usize) -> Self {
        let mut transform = Self::new();
        transform.resize(n);
        transform
    }

    /// Resize the input buffer to `n` samples.
    ///
    /// No-op when `n` already matches the current allocation. A resize
    /// invalidates previously set samples.
    pub fn resize(&mut self, n: usize) {
        if n == self.input.len() {
            return;
        }
        self.input.clear();
        self.input.resize(n, 0.0);
        self.output.clear();
        self.output.resize(n, Complex::new(0.0, 0.0));
        self.plan = (n > 0).then(|| self.planner.plan_fft_forward(n));
    }

    /// Current input length in samples.
    pub fn input_len(&self) -> usize {
        self.input.len()
    }

    /// Number of frequency bins produced by `execute`, following the
    /// real-to-complex halved-plus-one convention.
    pub fn output_len(&self) -> usize {
        self.input.len() / 2 + 1
    }

    /// Set input sample `i`.
    ///
    /// # Panics
    /// Panics if `i` is outside the current input length.
    pub fn set_sample(&mut self, i: usize, value: f64) {
        self.input[i] = value;
    }

    /// Run the forward transform over the current input buffer.
    ///
    /// No windowing or zero-padding is applied; that decision belongs to the
    /// caller. Executing with a zero-length buffer is a contract violation
    /// (it indicates the caller never resized) and fails explicitly.
    pub fn execute(&mut self) -> AnalysisResult<()> {
        let plan = self.plan.as_ref().ok_or_else(|| {
            AnalysisError::processing("spectral", "execute called with a zero-length buffer")
        })?;

        for (out, &sample) in self.output.iter_mut().zip(self.input.iter()) {
            *out = Complex::new(sample, 0.0);
        }
        plan.process(&mut self.output);
        Ok(())
    }

    /// Real component of frequency bin `i`.
    pub fn real(&self, i: usize) -> f64 {
        self.output[i].re
    }

    /// Imaginary component of frequency bin `i`.
    pub fn imag(&self, i: usize) -> f64 {
        self.output[i].im
    }
}

impl Default for SpectralTransform {
    fn default() -> Self {
        Self::new()
    }
}
