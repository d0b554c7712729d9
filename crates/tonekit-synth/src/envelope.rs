//! ADSR envelope curves for amplitude shaping.
//!
//! Unlike a gate-driven envelope that advances one sample at a time, the
//! curve here is computed up front for a buffer of known length and then
//! multiplied into it.
//!
//! ```text
//!   gain
//!    1.0 ┐    ╱╲
//!        │   ╱  ╲_________
//!    S   │  ╱             ╲
//!        │ ╱               ╲
//!    0.0 └╱─────────────────╲→ samples
//!         attack decay sustain release
//!                        └─ release is carved out of the tail of sustain
//! ```
//!
//! Phase lengths are resolved in a fixed order, each clipped to what is left:
//!
//! 1. `attack  = min(round(A·sr), total)`
//! 2. `decay   = min(round(D·sr), total − attack)`
//! 3. `sustain = total − attack − decay`
//! 4. `release = min(round(R·sr), sustain)`, overwriting the last `release`
//!    samples of sustain
//!
//! Every ramp includes both endpoints. A one-sample ramp holds its start value.

use alloc::vec::Vec;

use crate::buffer::{SampleBuffer, clamp_to_i16};
use crate::error::{Result, SynthError, ensure_non_negative};
use crate::waveform::MAX_SAMPLES;

/// Attack, decay and release times in seconds, and the sustain level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdsrParams {
    /// Seconds to ramp from 0 to 1.
    pub attack: f64,
    /// Seconds to ramp from 1 to the sustain level.
    pub decay: f64,
    /// Level held between decay and release (0.0 to 1.0).
    pub sustain: f64,
    /// Seconds to ramp from the sustain level to 0.
    pub release: f64,
}

impl AdsrParams {
    /// Flat envelope at unity gain.
    pub const PASSTHROUGH: AdsrParams = AdsrParams {
        attack: 0.0,
        decay: 0.0,
        sustain: 1.0,
        release: 0.0,
    };

    /// Create envelope parameters. Call [`AdsrParams::validate`] (or let the
    /// envelope builder do it) before use.
    pub fn new(attack: f64, decay: f64, sustain: f64, release: f64) -> Self {
        Self {
            attack,
            decay,
            sustain,
            release,
        }
    }

    /// Check that every time is a finite non-negative number and the sustain
    /// level lies in [0, 1].
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("attack", self.attack)?;
        ensure_non_negative("decay", self.decay)?;
        ensure_non_negative("release", self.release)?;
        if !(0.0..=1.0).contains(&self.sustain) {
            return Err(SynthError::invalid(
                "sustain",
                self.sustain,
                "must be in [0, 1]",
            ));
        }
        Ok(())
    }
}

impl Default for AdsrParams {
    /// 100 ms attack, 200 ms decay, sustain at half level, 300 ms release.
    fn default() -> Self {
        Self::new(0.1, 0.2, 0.5, 0.3)
    }
}

/// Resolved phase lengths in samples.
///
/// `sustain` counts only the held samples left after the release ramp has
/// been carved out, so the four fields always sum to the buffer length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnvelopeSegments {
    /// Attack ramp length.
    pub attack: usize,
    /// Decay ramp length.
    pub decay: usize,
    /// Held sustain length.
    pub sustain: usize,
    /// Release ramp length.
    pub release: usize,
}

impl EnvelopeSegments {
    /// Resolve phase lengths for a buffer of `total` samples.
    pub fn compute(params: &AdsrParams, total: usize, sample_rate: u32) -> Result<Self> {
        params.validate()?;
        if total < 1 {
            return Err(SynthError::EmptyBuffer);
        }
        if total > MAX_SAMPLES {
            return Err(SynthError::invalid(
                "total",
                total as f64,
                "exceeds the maximum buffer length",
            ));
        }
        if sample_rate == 0 {
            return Err(SynthError::invalid("sample_rate", 0.0, "must be > 0"));
        }

        let attack = seconds_to_samples(params.attack, sample_rate).min(total);
        let decay = seconds_to_samples(params.decay, sample_rate).min(total - attack);
        let sustain_span = total - attack - decay;
        let release = seconds_to_samples(params.release, sample_rate).min(sustain_span);

        Ok(Self {
            attack,
            decay,
            sustain: sustain_span - release,
            release,
        })
    }

    /// Sum of all phase lengths.
    pub fn total(&self) -> usize {
        self.attack + self.decay + self.sustain + self.release
    }

    /// Index of the first release sample.
    pub fn release_start(&self) -> usize {
        self.attack + self.decay + self.sustain
    }
}

/// A per-sample gain curve for one buffer.
///
/// # Example
///
/// ```rust
/// use tonekit_synth::{AdsrParams, EnvelopeCurve, SAMPLE_RATE};
///
/// let params = AdsrParams::new(0.1, 0.2, 0.5, 0.3);
/// let curve = EnvelopeCurve::build(&params, 44_100, SAMPLE_RATE).unwrap();
///
/// assert_eq!(curve.len(), 44_100);
/// assert_eq!(curve.gains()[0], 0.0);
/// assert_eq!(curve.gains()[44_099], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopeCurve {
    gains: Vec<f64>,
    segments: EnvelopeSegments,
}

impl EnvelopeCurve {
    /// Build the curve for a buffer of `total` samples.
    ///
    /// Fails with [`SynthError::InvalidParameter`] for negative times, a
    /// sustain level outside [0, 1] or a `total` above
    /// [`MAX_SAMPLES`](crate::MAX_SAMPLES), and with
    /// [`SynthError::EmptyBuffer`] when `total` is zero.
    pub fn build(params: &AdsrParams, total: usize, sample_rate: u32) -> Result<Self> {
        let segments = EnvelopeSegments::compute(params, total, sample_rate)?;
        let sustain = params.sustain;

        let mut gains = Vec::with_capacity(total);
        push_ramp(&mut gains, 0.0, 1.0, segments.attack);
        push_ramp(&mut gains, 1.0, sustain, segments.decay);
        gains.resize(gains.len() + segments.sustain, sustain);
        push_ramp(&mut gains, sustain, 0.0, segments.release);

        debug_assert_eq!(gains.len(), total);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            attack = segments.attack,
            decay = segments.decay,
            sustain = segments.sustain,
            release = segments.release,
            "envelope segments"
        );

        Ok(Self { gains, segments })
    }

    /// Per-sample gain values.
    pub fn gains(&self) -> &[f64] {
        &self.gains
    }

    /// Resolved phase lengths.
    pub fn segments(&self) -> EnvelopeSegments {
        self.segments
    }

    /// Number of gain values.
    pub fn len(&self) -> usize {
        self.gains.len()
    }

    /// Whether the curve is empty. Never true for a built curve.
    pub fn is_empty(&self) -> bool {
        self.gains.is_empty()
    }

    /// Apply the curve to a buffer of the same length.
    pub fn apply(&self, buffer: &SampleBuffer) -> Result<SampleBuffer> {
        let samples = apply_gain(buffer.samples(), &self.gains)?;
        Ok(SampleBuffer::with_sample_rate(samples, buffer.sample_rate()))
    }
}

/// Multiply samples by gains, rounding to nearest and clamping to the 16-bit
/// range.
///
/// Gains are not restricted to [0, 1]; products outside the 16-bit range
/// saturate instead of wrapping.
pub fn apply_gain(samples: &[i16], gains: &[f64]) -> Result<Vec<i16>> {
    if samples.len() != gains.len() {
        return Err(SynthError::LengthMismatch {
            samples: samples.len(),
            curve: gains.len(),
        });
    }
    Ok(samples
        .iter()
        .zip(gains)
        .map(|(&s, &g)| clamp_to_i16(f64::from(s) * g))
        .collect())
}

#[inline]
fn seconds_to_samples(seconds: f64, sample_rate: u32) -> usize {
    libm::round(seconds * f64::from(sample_rate)) as usize
}

/// Append `n` evenly spaced values from `start` to `end`, both included.
fn push_ramp(out: &mut Vec<f64>, start: f64, end: f64, n: usize) {
    match n {
        0 => {}
        1 => out.push(start),
        _ => {
            let step = (end - start) / (n - 1) as f64;
            out.extend((0..n - 1).map(|k| start + step * k as f64));
            out.push(end);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::SAMPLE_RATE;
    use alloc::vec;

    const SR: u32 = 1_000;

    #[test]
    fn ramp_includes_both_endpoints() {
        let mut out = Vec::new();
        push_ramp(&mut out, 0.0, 1.0, 5);
        assert_eq!(out, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn single_sample_ramp_holds_start() {
        let mut out = Vec::new();
        push_ramp(&mut out, 0.0, 1.0, 1);
        assert_eq!(out, vec![0.0]);
    }

    #[test]
    fn segments_follow_requested_times() {
        let params = AdsrParams::new(0.1, 0.2, 0.5, 0.3);
        let seg = EnvelopeSegments::compute(&params, 1_000, SR).unwrap();
        assert_eq!(
            seg,
            EnvelopeSegments {
                attack: 100,
                decay: 200,
                sustain: 400,
                release: 300,
            }
        );
        assert_eq!(seg.total(), 1_000);
        assert_eq!(seg.release_start(), 700);
    }

    #[test]
    fn attack_clipped_to_total() {
        let params = AdsrParams::new(5.0, 1.0, 0.5, 1.0);
        let seg = EnvelopeSegments::compute(&params, 1_000, SR).unwrap();
        assert_eq!(seg.attack, 1_000);
        assert_eq!(seg.decay, 0);
        assert_eq!(seg.sustain, 0);
        assert_eq!(seg.release, 0);
    }

    #[test]
    fn decay_clipped_to_remaining() {
        let params = AdsrParams::new(0.6, 0.6, 0.5, 0.1);
        let seg = EnvelopeSegments::compute(&params, 1_000, SR).unwrap();
        assert_eq!(seg.attack, 600);
        assert_eq!(seg.decay, 400);
        assert_eq!(seg.total(), 1_000);
    }

    #[test]
    fn release_limited_to_sustain_span() {
        let params = AdsrParams::new(0.1, 0.1, 0.5, 2.0);
        let seg = EnvelopeSegments::compute(&params, 1_000, SR).unwrap();
        assert_eq!(seg.release, 800);
        assert_eq!(seg.sustain, 0);

        let curve = EnvelopeCurve::build(&params, 1_000, SR).unwrap();
        assert_eq!(curve.len(), 1_000);
        assert_eq!(curve.gains()[200], 0.5);
        assert_eq!(curve.gains()[999], 0.0);
    }

    #[test]
    fn curve_shape_matches_phases() {
        let params = AdsrParams::new(0.1, 0.2, 0.5, 0.3);
        let curve = EnvelopeCurve::build(&params, 1_000, SR).unwrap();
        let g = curve.gains();

        assert_eq!(g[0], 0.0);
        assert_eq!(g[99], 1.0);
        assert_eq!(g[100], 1.0);
        assert_eq!(g[299], 0.5);
        assert!(g[300..700].iter().all(|&v| v == 0.5));
        assert_eq!(g[700], 0.5);
        assert_eq!(g[999], 0.0);
        assert!(g[700..].windows(2).all(|w| w[1] < w[0]));
        assert!(g.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn passthrough_is_constant_unity() {
        let curve = EnvelopeCurve::build(&AdsrParams::PASSTHROUGH, 4_410, SAMPLE_RATE).unwrap();
        assert!(curve.gains().iter().all(|&g| g == 1.0));
    }

    #[test]
    fn zero_sustain_decays_to_silence() {
        let params = AdsrParams::new(0.0, 0.5, 0.0, 0.0);
        let curve = EnvelopeCurve::build(&params, 1_000, SR).unwrap();
        assert_eq!(curve.gains()[0], 1.0);
        assert_eq!(curve.gains()[499], 0.0);
        assert!(curve.gains()[500..].iter().all(|&g| g == 0.0));
    }

    #[test]
    fn rejects_invalid_params() {
        for params in [
            AdsrParams::new(-0.1, 0.0, 0.5, 0.0),
            AdsrParams::new(0.0, -0.1, 0.5, 0.0),
            AdsrParams::new(0.0, 0.0, 0.5, -0.1),
            AdsrParams::new(0.0, 0.0, 1.1, 0.0),
            AdsrParams::new(0.0, 0.0, -0.1, 0.0),
            AdsrParams::new(f64::NAN, 0.0, 0.5, 0.0),
            AdsrParams::new(0.0, 0.0, f64::NAN, 0.0),
        ] {
            let err = EnvelopeCurve::build(&params, 100, SR).unwrap_err();
            assert!(
                matches!(err, SynthError::InvalidParameter { .. }),
                "{params:?} -> {err:?}"
            );
        }
    }

    #[test]
    fn rejects_empty_total() {
        let err = EnvelopeCurve::build(&AdsrParams::default(), 0, SR).unwrap_err();
        assert_eq!(err, SynthError::EmptyBuffer);
    }

    #[test]
    fn rejects_oversized_total() {
        for total in [MAX_SAMPLES + 1, usize::MAX] {
            let err = EnvelopeCurve::build(&AdsrParams::default(), total, SR).unwrap_err();
            assert!(matches!(err, SynthError::InvalidParameter { name: "total", .. }));
        }
    }

    #[test]
    fn apply_gain_rounds_and_clamps() {
        let out = apply_gain(&[100, -100, 30_000, i16::MIN], &[0.505, 0.505, 2.0, 1.0]).unwrap();
        assert_eq!(out, vec![51, -51, i16::MAX, i16::MIN]);
    }

    #[test]
    fn apply_gain_rejects_length_mismatch() {
        let err = apply_gain(&[1, 2, 3], &[1.0, 1.0]).unwrap_err();
        assert_eq!(
            err,
            SynthError::LengthMismatch {
                samples: 3,
                curve: 2
            }
        );
    }

    #[test]
    fn apply_keeps_sample_rate() {
        let buffer = SampleBuffer::with_sample_rate(vec![1_000; 100], SR);
        let curve = EnvelopeCurve::build(&AdsrParams::PASSTHROUGH, 100, SR).unwrap();
        let out = curve.apply(&buffer).unwrap();
        assert_eq!(out, buffer);
    }
}
