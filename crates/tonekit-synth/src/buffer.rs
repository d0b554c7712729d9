//! Mono 16-bit PCM sample buffers.

use alloc::vec::Vec;

/// Output sample rate in Hz. All synthesis output uses this rate.
pub const SAMPLE_RATE: u32 = 44_100;

/// Output channel count (mono).
pub const CHANNELS: u16 = 1;

/// Output bit depth.
pub const BITS_PER_SAMPLE: u16 = 16;

/// File name for exported audio when no other path is configured.
pub const DEFAULT_EXPORT_PATH: &str = "output.wav";

/// Round a sample value to the nearest integer and clamp it to the signed
/// 16-bit range.
///
/// NaN maps to silence.
#[inline]
pub fn clamp_to_i16(value: f64) -> i16 {
    let rounded = libm::round(value);
    if rounded.is_nan() {
        return 0;
    }
    rounded.clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
}

/// A finished block of mono signed 16-bit PCM audio.
///
/// Produced fresh by every synthesis call and owned by the caller.
///
/// # Example
///
/// ```rust
/// use tonekit_synth::{SampleBuffer, SAMPLE_RATE};
///
/// let buffer = SampleBuffer::new(vec![0, 1000, -1000, 0]);
/// assert_eq!(buffer.len(), 4);
/// assert_eq!(buffer.sample_rate(), SAMPLE_RATE);
/// assert_eq!(buffer.peak(), 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Wrap samples recorded at [`SAMPLE_RATE`].
    pub fn new(samples: Vec<i16>) -> Self {
        Self::with_sample_rate(samples, SAMPLE_RATE)
    }

    /// Wrap samples recorded at an arbitrary rate (e.g. read back from disk).
    pub fn with_sample_rate(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Borrow the raw samples.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Consume the buffer and return the raw samples.
    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Channel count, always mono.
    pub fn channels(&self) -> u16 {
        CHANNELS
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> u16 {
        self.samples
            .iter()
            .map(|s| s.unsigned_abs())
            .max()
            .unwrap_or(0)
    }

    /// Root-mean-square amplitude in sample units.
    pub fn rms(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = self
            .samples
            .iter()
            .map(|&s| {
                let v = f64::from(s);
                v * v
            })
            .sum();
        libm::sqrt(sum_sq / self.samples.len() as f64)
    }

    /// Convert to normalized f32 samples in [-1.0, 1.0) for audio devices.
    pub fn to_f32(&self) -> Vec<f32> {
        self.samples
            .iter()
            .map(|&s| f32::from(s) / 32768.0)
            .collect()
    }
}

impl AsRef<[i16]> for SampleBuffer {
    fn as_ref(&self) -> &[i16] {
        &self.samples
    }
}

impl From<SampleBuffer> for Vec<i16> {
    fn from(buffer: SampleBuffer) -> Self {
        buffer.samples
    }
}
