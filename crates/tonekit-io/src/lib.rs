//! Audio output layer for tonekit.
//!
//! This crate provides the two consumers of a finished
//! [`SampleBuffer`](tonekit_synth::SampleBuffer):
//!
//! - **WAV export**: [`write_wav`] / [`WavExporter`] write RIFF/WAVE, PCM,
//!   mono, 16-bit, 44.1 kHz files; [`read_wav`] and [`read_wav_info`] load
//!   them back
//! - **Playback**: [`Playback`] plays a buffer on an output device and blocks
//!   until it has finished
//!
//! Both implement [`PcmSink`], so callers can pick a destination at runtime.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tonekit_io::{PcmSink, WavExporter};
//! use tonekit_synth::{synthesize, RenderSettings, SynthesisRequest};
//!
//! let buffer = synthesize(&SynthesisRequest::default(), &RenderSettings::default())?;
//! WavExporter::default().consume(&buffer)?; // writes output.wav
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod playback;
mod sink;
mod wav;

pub use playback::{
    AudioDevice, DEFAULT_PLAYBACK_TIMEOUT_GRACE, Playback, default_output_device,
    list_output_devices,
};
pub use sink::{PcmSink, WavExporter};
pub use wav::{WavFormat, WavInfo, pcm_wav_spec, read_wav, read_wav_info, write_wav};

/// Error types for audio output operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Audio stream setup or runtime error.
    #[error("Audio stream error: {0}")]
    Stream(String),

    /// No audio device available on the system.
    #[error("No audio device available")]
    NoDevice,

    /// The file's sample format is not mono 16-bit PCM.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// The requested audio device was not found.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio output operations.
pub type Result<T> = std::result::Result<T, Error>;
