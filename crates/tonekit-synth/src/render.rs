//! The synthesis pipeline: generate, shape, repack.

use crate::buffer::{SAMPLE_RATE, SampleBuffer};
use crate::envelope::EnvelopeCurve;
use crate::error::{Result, SynthError};
use crate::request::SynthesisRequest;
use crate::waveform::{DEFAULT_HEADROOM, DEFAULT_NOISE_SEED, WaveformGenerator, ensure_duration};

/// Default rendered tone length in seconds.
pub const DEFAULT_DURATION_SECS: f64 = 1.0;

/// How a request is rendered: length, amplitude and noise seed.
///
/// Output is always mono 16-bit at [`SAMPLE_RATE`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    /// Tone length in seconds.
    pub duration_secs: f64,
    /// Fraction of full-scale amplitude, in (0, 1].
    pub headroom: f64,
    /// Seed for white noise.
    pub noise_seed: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            headroom: DEFAULT_HEADROOM,
            noise_seed: DEFAULT_NOISE_SEED,
        }
    }
}

impl RenderSettings {
    /// Check duration and headroom ranges.
    ///
    /// Duration must lie in (0, [`MAX_DURATION_SECS`]].
    ///
    /// [`MAX_DURATION_SECS`]: crate::MAX_DURATION_SECS
    pub fn validate(&self) -> Result<()> {
        ensure_duration(self.duration_secs)?;
        if !(self.headroom > 0.0 && self.headroom <= 1.0) {
            return Err(SynthError::invalid(
                "headroom",
                self.headroom,
                "must be in (0, 1]",
            ));
        }
        Ok(())
    }
}

/// Renders requests with fixed [`RenderSettings`].
///
/// Holds no state between calls; rendering the same request twice yields
/// identical buffers.
///
/// # Example
///
/// ```rust
/// use tonekit_synth::{RenderSettings, SynthesisRequest, Synthesizer};
///
/// let synth = Synthesizer::new(RenderSettings::default()).unwrap();
/// let buffer = synth.render(&SynthesisRequest::default()).unwrap();
///
/// assert_eq!(buffer.len(), 44_100);
/// assert_eq!(buffer.samples()[0], 0);
/// ```
#[derive(Debug, Clone)]
pub struct Synthesizer {
    settings: RenderSettings,
    generator: WaveformGenerator,
}

impl Synthesizer {
    /// Create a synthesizer after validating the settings.
    pub fn new(settings: RenderSettings) -> Result<Self> {
        settings.validate()?;
        let mut generator = WaveformGenerator::new(SAMPLE_RATE);
        generator.set_headroom(settings.headroom)?;
        generator.set_noise_seed(settings.noise_seed);
        Ok(Self {
            settings,
            generator,
        })
    }

    /// Active render settings.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Render one request into a finished buffer.
    pub fn render(&self, request: &SynthesisRequest) -> Result<SampleBuffer> {
        request.validate()?;

        let raw = self.generator.generate(
            request.waveform(),
            request.frequency(),
            self.settings.duration_secs,
        )?;
        let curve = EnvelopeCurve::build(request.adsr(), raw.len(), raw.sample_rate())?;
        let shaped = curve.apply(&raw)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            waveform = request.waveform().name(),
            frequency = request.frequency(),
            samples = shaped.len(),
            peak = shaped.peak(),
            "rendered tone"
        );

        Ok(shaped)
    }
}

/// Render one request with the given settings.
pub fn synthesize(request: &SynthesisRequest, settings: &RenderSettings) -> Result<SampleBuffer> {
    Synthesizer::new(*settings)?.render(request)
}
