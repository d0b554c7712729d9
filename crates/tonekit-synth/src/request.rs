//! Synthesis request values.

use crate::envelope::AdsrParams;
use crate::error::{Result, ensure_positive};
use crate::waveform::Waveform;

/// Default tone frequency in Hz (A4).
pub const DEFAULT_FREQUENCY: f64 = 440.0;

/// Everything needed to synthesize one tone: waveform, frequency and
/// envelope.
///
/// Constructed once through [`SynthesisRequest::new`], which validates every
/// field, and immutable afterwards.
///
/// # Example
///
/// ```rust
/// use tonekit_synth::{AdsrParams, SynthesisRequest, Waveform};
///
/// let request = SynthesisRequest::new(Waveform::Square, 220.0, AdsrParams::default()).unwrap();
/// assert_eq!(request.frequency(), 220.0);
///
/// assert!(SynthesisRequest::new(Waveform::Sine, 0.0, AdsrParams::default()).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisRequest {
    waveform: Waveform,
    frequency: f64,
    adsr: AdsrParams,
}

impl SynthesisRequest {
    /// Create a validated request.
    pub fn new(waveform: Waveform, frequency: f64, adsr: AdsrParams) -> Result<Self> {
        let request = Self {
            waveform,
            frequency,
            adsr,
        };
        request.validate()?;
        Ok(request)
    }

    /// Check frequency and envelope ranges.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("frequency", self.frequency)?;
        self.adsr.validate()
    }

    /// Waveform shape.
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Frequency in Hz.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Envelope parameters.
    pub fn adsr(&self) -> &AdsrParams {
        &self.adsr
    }
}

impl Default for SynthesisRequest {
    /// 440 Hz sine with the default envelope.
    fn default() -> Self {
        Self {
            waveform: Waveform::Sine,
            frequency: DEFAULT_FREQUENCY,
            adsr: AdsrParams::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SynthError;

    #[test]
    fn default_request_is_valid() {
        let request = SynthesisRequest::default();
        assert!(request.validate().is_ok());
        assert_eq!(request.waveform(), Waveform::Sine);
        assert_eq!(request.frequency(), 440.0);
        assert_eq!(*request.adsr(), AdsrParams::new(0.1, 0.2, 0.5, 0.3));
    }

    #[test]
    fn rejects_bad_frequency() {
        let err = SynthesisRequest::new(Waveform::Sine, -5.0, AdsrParams::default()).unwrap_err();
        assert!(matches!(
            err,
            SynthError::InvalidParameter {
                name: "frequency",
                ..
            }
        ));
    }

    #[test]
    fn rejects_bad_envelope() {
        let adsr = AdsrParams::new(0.1, 0.1, 2.0, 0.1);
        let err = SynthesisRequest::new(Waveform::Sine, 440.0, adsr).unwrap_err();
        assert!(matches!(
            err,
            SynthError::InvalidParameter { name: "sustain", .. }
        ));
    }
}
