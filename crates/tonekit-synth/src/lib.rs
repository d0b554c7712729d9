//! Tonekit Synth - tone synthesis core for the tonekit workspace
//!
//! Renders a single tone: a raw waveform multiplied sample by sample by a
//! linear ADSR gain curve, packed as mono 16-bit PCM at 44.1 kHz. Every call
//! is a pure function of its inputs and allocates its own buffers.
//!
//! # Core Components
//!
//! ## Waveform Generator
//!
//! - [`Waveform`] - Closed set of shapes (Sine, Sawtooth, Square, WhiteNoise)
//! - [`WaveformGenerator`] - Renders a raw buffer at a given amplitude
//!
//! ```rust
//! use tonekit_synth::{generate, Waveform, SAMPLE_RATE};
//!
//! let raw = generate(Waveform::Sine, 440.0, 0.5, SAMPLE_RATE).unwrap();
//! assert_eq!(raw.len(), 22_050);
//! ```
//!
//! ## Envelope Engine
//!
//! - [`AdsrParams`] - Attack/decay/release seconds and sustain level
//! - [`EnvelopeCurve`] - Per-sample gain curve, applied with clamping
//!
//! ```rust
//! use tonekit_synth::{generate, AdsrParams, EnvelopeCurve, Waveform, SAMPLE_RATE};
//!
//! let raw = generate(Waveform::Square, 220.0, 1.0, SAMPLE_RATE).unwrap();
//! let curve = EnvelopeCurve::build(&AdsrParams::default(), raw.len(), SAMPLE_RATE).unwrap();
//! let shaped = curve.apply(&raw).unwrap();
//! assert_eq!(shaped.len(), raw.len());
//! ```
//!
//! ## Pipeline
//!
//! - [`SynthesisRequest`] - Validated waveform, frequency and envelope
//! - [`RenderSettings`] - Duration, headroom and noise seed
//! - [`synthesize`] / [`Synthesizer`] - Request in, finished [`SampleBuffer`] out
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (it needs `alloc`). Disable the default
//! `std` feature:
//!
//! ```toml
//! [dependencies]
//! tonekit-synth = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod buffer;
pub mod envelope;
pub mod error;
pub mod render;
pub mod request;
pub mod waveform;

// Re-export main types at crate root
pub use buffer::{
    BITS_PER_SAMPLE, CHANNELS, DEFAULT_EXPORT_PATH, SAMPLE_RATE, SampleBuffer, clamp_to_i16,
};
pub use envelope::{AdsrParams, EnvelopeCurve, EnvelopeSegments, apply_gain};
pub use error::{Result, SynthError};
pub use render::{DEFAULT_DURATION_SECS, RenderSettings, Synthesizer, synthesize};
pub use request::{DEFAULT_FREQUENCY, SynthesisRequest};
pub use waveform::{
    DEFAULT_HEADROOM, DEFAULT_NOISE_SEED, MAX_DURATION_SECS, MAX_SAMPLES, Waveform,
    WaveformGenerator, generate, sample_count,
};
