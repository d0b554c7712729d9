//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use clap::{Args, ValueEnum};
use std::path::Path;
use tonekit_config::{Settings, load_or_default};
use tonekit_synth::{SampleBuffer, Waveform, synthesize};

/// Waveform choices for the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CliWaveform {
    Sine,
    #[value(alias = "saw")]
    Sawtooth,
    Square,
    #[value(alias = "white-noise")]
    Noise,
}

impl From<CliWaveform> for Waveform {
    fn from(w: CliWaveform) -> Self {
        match w {
            CliWaveform::Sine => Waveform::Sine,
            CliWaveform::Sawtooth => Waveform::Sawtooth,
            CliWaveform::Square => Waveform::Square,
            CliWaveform::Noise => Waveform::WhiteNoise,
        }
    }
}

/// Tone options. Each one given overrides the value from the settings file.
#[derive(Args, Debug, Default, Clone)]
pub struct ToneArgs {
    /// Waveform
    #[arg(short, long, value_enum)]
    pub waveform: Option<CliWaveform>,

    /// Frequency in Hz
    #[arg(short, long)]
    pub freq: Option<f64>,

    /// Attack time in seconds
    #[arg(long)]
    pub attack: Option<f64>,

    /// Decay time in seconds
    #[arg(long)]
    pub decay: Option<f64>,

    /// Sustain level (0-1)
    #[arg(long)]
    pub sustain: Option<f64>,

    /// Release time in seconds
    #[arg(long)]
    pub release: Option<f64>,

    /// Tone length in seconds
    #[arg(short, long)]
    pub duration: Option<f64>,

    /// Fraction of full-scale amplitude (0-1]
    #[arg(long)]
    pub headroom: Option<f64>,

    /// White noise seed
    #[arg(long)]
    pub seed: Option<u32>,
}

impl ToneArgs {
    /// Overlay the given options onto `settings`.
    pub fn apply(&self, settings: &mut Settings) {
        let tone = &mut settings.tone;
        if let Some(w) = self.waveform {
            tone.waveform = Waveform::from(w).name().to_string();
        }
        if let Some(v) = self.freq {
            tone.frequency = v;
        }
        if let Some(v) = self.attack {
            tone.attack = v;
        }
        if let Some(v) = self.decay {
            tone.decay = v;
        }
        if let Some(v) = self.sustain {
            tone.sustain = v;
        }
        if let Some(v) = self.release {
            tone.release = v;
        }

        let render = &mut settings.render;
        if let Some(v) = self.duration {
            render.duration_secs = v;
        }
        if let Some(v) = self.headroom {
            render.headroom = v;
        }
        if let Some(v) = self.seed {
            render.noise_seed = v;
        }
    }
}

/// Load settings from `config` (or the user file) and apply tone overrides.
pub fn load_settings(config: Option<&Path>, tone: &ToneArgs) -> anyhow::Result<Settings> {
    let mut settings = load_or_default(config).context("failed to load settings")?;
    tone.apply(&mut settings);
    Ok(settings)
}

/// Synthesize the tone `settings` describe.
pub fn render(settings: &Settings) -> anyhow::Result<SampleBuffer> {
    let request = settings.to_request()?;
    let buffer = synthesize(&request, &settings.render_settings())?;
    tracing::info!(
        waveform = %request.waveform(),
        frequency = request.frequency(),
        samples = buffer.len(),
        "synthesized tone"
    );
    Ok(buffer)
}
