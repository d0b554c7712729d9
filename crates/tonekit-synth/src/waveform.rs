//! Raw waveform generation.
//!
//! Renders one of four periodic (or noise) signals into a [`SampleBuffer`] of
//! `round(duration * sample_rate)` samples at a fixed amplitude.
//!
//! | Waveform     | Sample `i` (phase `p = frac(i·f/sr)`)  |
//! |--------------|----------------------------------------|
//! | `Sine`       | `round(A·sin(2π·f·i/sr))`              |
//! | `Sawtooth`   | `A·(2p − 1)`                            |
//! | `Square`     | `+A` if `p < 0.5`, else `−A`            |
//! | `WhiteNoise` | uniform in `[−A, A]`, seeded xorshift32 |

use core::f64::consts::TAU;
use core::fmt;
use core::str::FromStr;

use alloc::string::ToString;
use alloc::vec::Vec;

use crate::buffer::{SampleBuffer, clamp_to_i16};
use crate::error::{Result, SynthError, ensure_positive};

/// Seed used for white noise when none is configured.
pub const DEFAULT_NOISE_SEED: u32 = 0x1234_5678;

/// Default headroom: full scale.
pub const DEFAULT_HEADROOM: f64 = 1.0;

/// Waveform shapes supported by the generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Waveform {
    /// Pure fundamental tone.
    #[default]
    Sine,
    /// Rising ramp from −A to A once per period.
    Sawtooth,
    /// 50% duty cycle square wave.
    Square,
    /// Uniform white noise; ignores frequency.
    WhiteNoise,
}

impl Waveform {
    /// All waveforms, in picker order.
    pub const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Sawtooth,
        Waveform::Square,
        Waveform::WhiteNoise,
    ];

    /// Canonical display name.
    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Square => "square",
            Waveform::WhiteNoise => "white noise",
        }
    }

    /// Position of this waveform in [`Waveform::ALL`].
    pub fn index(self) -> usize {
        match self {
            Waveform::Sine => 0,
            Waveform::Sawtooth => 1,
            Waveform::Square => 2,
            Waveform::WhiteNoise => 3,
        }
    }

    /// Look up a waveform by picker index.
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| SynthError::UnsupportedWaveform(alloc::format!("index {index}")))
    }

}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Waveform {
    type Err = SynthError;

    /// Parse a waveform name, case-insensitively.
    ///
    /// Accepts the canonical names plus `saw`, `noise`, `white-noise` and
    /// `white_noise`.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();

        if any_eq(name, &["sine", "sin"]) {
            Ok(Waveform::Sine)
        } else if any_eq(name, &["sawtooth", "saw"]) {
            Ok(Waveform::Sawtooth)
        } else if any_eq(name, &["square", "sqr"]) {
            Ok(Waveform::Square)
        } else if any_eq(
            name,
            &["white noise", "white-noise", "white_noise", "whitenoise", "noise"],
        ) {
            Ok(Waveform::WhiteNoise)
        } else {
            Err(SynthError::UnsupportedWaveform(name.to_string()))
        }
    }
}

fn any_eq(name: &str, candidates: &[&str]) -> bool {
    candidates.iter().any(|c| c.eq_ignore_ascii_case(name))
}

/// Number of samples covering `duration_secs` at `sample_rate`.
#[inline]
pub fn sample_count(duration_secs: f64, sample_rate: u32) -> usize {
    libm::round(duration_secs * f64::from(sample_rate)) as usize
}

/// Longest tone that can be rendered, in seconds.
pub const MAX_DURATION_SECS: f64 = 3600.0;

/// Upper bound on buffer length: [`MAX_DURATION_SECS`] at [`SAMPLE_RATE`].
///
/// [`SAMPLE_RATE`]: crate::SAMPLE_RATE
pub const MAX_SAMPLES: usize = 3600 * 44_100;

/// Reject durations that are not finite, not positive, or above
/// [`MAX_DURATION_SECS`].
pub(crate) fn ensure_duration(duration_secs: f64) -> Result<()> {
    ensure_positive("duration", duration_secs)?;
    if duration_secs > MAX_DURATION_SECS {
        return Err(SynthError::invalid(
            "duration",
            duration_secs,
            "must be at most 3600 seconds",
        ));
    }
    Ok(())
}

/// Renders raw waveforms at a fixed sample rate and amplitude.
///
/// # Example
///
/// ```rust
/// use tonekit_synth::{Waveform, WaveformGenerator, SAMPLE_RATE};
///
/// let mut generator = WaveformGenerator::new(SAMPLE_RATE);
/// generator.set_headroom(0.5).unwrap();
///
/// let buffer = generator.generate(Waveform::Square, 441.0, 0.01).unwrap();
/// assert_eq!(buffer.len(), 441);
/// assert_eq!(buffer.samples()[0], 16384);
/// ```
#[derive(Debug, Clone)]
pub struct WaveformGenerator {
    sample_rate: u32,
    headroom: f64,
    noise_seed: u32,
}

impl WaveformGenerator {
    /// Create a full-scale generator for the given sample rate.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            headroom: DEFAULT_HEADROOM,
            noise_seed: DEFAULT_NOISE_SEED,
        }
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Set the headroom factor in (0, 1] applied to full-scale amplitude.
    pub fn set_headroom(&mut self, headroom: f64) -> Result<()> {
        if !(headroom.is_finite() && headroom > 0.0 && headroom <= 1.0) {
            return Err(SynthError::invalid(
                "headroom",
                headroom,
                "must be in (0, 1]",
            ));
        }
        self.headroom = headroom;
        Ok(())
    }

    /// Current headroom factor.
    pub fn headroom(&self) -> f64 {
        self.headroom
    }

    /// Set the white noise seed. Zero is replaced by [`DEFAULT_NOISE_SEED`]
    /// since xorshift never leaves the zero state.
    pub fn set_noise_seed(&mut self, seed: u32) {
        self.noise_seed = if seed == 0 { DEFAULT_NOISE_SEED } else { seed };
    }

    /// Current white noise seed.
    pub fn noise_seed(&self) -> u32 {
        self.noise_seed
    }

    /// Peak amplitude `A` in sample units.
    pub fn amplitude(&self) -> f64 {
        libm::round(f64::from(i16::MAX) * self.headroom)
    }

    /// Render `duration_secs` of `waveform` at `frequency` Hz.
    ///
    /// Fails with [`SynthError::InvalidParameter`] for a non-positive
    /// frequency, duration or sample rate, or a duration longer than
    /// [`MAX_DURATION_SECS`] (or [`MAX_SAMPLES`] samples), and with
    /// [`SynthError::EmptyBuffer`] when the duration rounds to zero samples.
    pub fn generate(
        &self,
        waveform: Waveform,
        frequency: f64,
        duration_secs: f64,
    ) -> Result<SampleBuffer> {
        ensure_positive("frequency", frequency)?;
        ensure_duration(duration_secs)?;
        if self.sample_rate == 0 {
            return Err(SynthError::invalid("sample_rate", 0.0, "must be > 0"));
        }

        let len = sample_count(duration_secs, self.sample_rate);
        if len == 0 {
            return Err(SynthError::EmptyBuffer);
        }
        if len > MAX_SAMPLES {
            return Err(SynthError::invalid(
                "duration",
                duration_secs,
                "exceeds the maximum buffer length at this sample rate",
            ));
        }

        let amplitude = self.amplitude();
        let sr = f64::from(self.sample_rate);
        let phase_at = |i: usize| {
            let cycles = i as f64 * frequency / sr;
            cycles - libm::floor(cycles)
        };

        let samples: Vec<i16> = match waveform {
            Waveform::Sine => (0..len)
                .map(|i| clamp_to_i16(amplitude * libm::sin(TAU * frequency * i as f64 / sr)))
                .collect(),
            Waveform::Sawtooth => (0..len)
                .map(|i| clamp_to_i16(amplitude * (2.0 * phase_at(i) - 1.0)))
                .collect(),
            Waveform::Square => (0..len)
                .map(|i| {
                    if phase_at(i) < 0.5 {
                        clamp_to_i16(amplitude)
                    } else {
                        clamp_to_i16(-amplitude)
                    }
                })
                .collect(),
            Waveform::WhiteNoise => {
                let mut noise = NoiseSource::new(self.noise_seed);
                (0..len)
                    .map(|_| clamp_to_i16(amplitude * noise.next_bipolar()))
                    .collect()
            }
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            waveform = waveform.name(),
            frequency,
            samples = len,
            "generated waveform"
        );

        Ok(SampleBuffer::with_sample_rate(samples, self.sample_rate))
    }
}

impl Default for WaveformGenerator {
    fn default() -> Self {
        Self::new(crate::buffer::SAMPLE_RATE)
    }
}

/// Render a full-scale waveform with the default noise seed.
///
/// Shorthand for [`WaveformGenerator::new`] followed by
/// [`WaveformGenerator::generate`].
pub fn generate(
    waveform: Waveform,
    frequency: f64,
    duration_secs: f64,
    sample_rate: u32,
) -> Result<SampleBuffer> {
    WaveformGenerator::new(sample_rate).generate(waveform, frequency, duration_secs)
}

/// Xorshift32 noise source.
#[derive(Debug, Clone)]
struct NoiseSource {
    state: u32,
}

impl NoiseSource {
    fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { DEFAULT_NOISE_SEED } else { seed },
        }
    }

    /// Next value, uniform in [-1, 1].
    #[inline]
    fn next_bipolar(&mut self) -> f64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;

        (f64::from(x as i32) / f64::from(i32::MAX)).max(-1.0)
    }
}
