//! Error types for tone synthesis.

use alloc::string::String;

/// Errors produced by the waveform generator and the envelope engine.
///
/// Every variant describes a local, recoverable condition. Synthesis calls are
/// atomic: on error no buffer is produced at all.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SynthError {
    /// A numeric parameter is outside its valid range.
    #[error("invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// Description of the accepted range.
        reason: &'static str,
    },

    /// A waveform tag that does not name one of the supported waveforms.
    #[error("unsupported waveform: '{0}'")]
    UnsupportedWaveform(String),

    /// The request resolves to zero samples.
    #[error("requested buffer contains no samples")]
    EmptyBuffer,

    /// A gain curve and a sample buffer of different lengths were combined.
    #[error("length mismatch: {samples} samples but {curve} envelope values")]
    LengthMismatch {
        /// Number of samples in the buffer.
        samples: usize,
        /// Number of values in the curve.
        curve: usize,
    },
}

impl SynthError {
    /// Create an invalid parameter error.
    pub fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        SynthError::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

/// Convenience result type for synthesis operations.
pub type Result<T> = core::result::Result<T, SynthError>;

/// Reject values that are NaN, infinite or not strictly positive.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SynthError::invalid(name, value, "must be a finite value > 0"))
    }
}

/// Reject values that are NaN, infinite or negative.
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SynthError::invalid(name, value, "must be a finite value >= 0"))
    }
}
