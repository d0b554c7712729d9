//! Persisted tone, render and output settings.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tonekit_synth::{
    AdsrParams, DEFAULT_DURATION_SECS, DEFAULT_EXPORT_PATH, DEFAULT_FREQUENCY, DEFAULT_HEADROOM,
    DEFAULT_NOISE_SEED, RenderSettings, SynthesisRequest, Waveform,
};

/// The tone to synthesize: waveform, pitch and envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneSettings {
    /// Frequency in Hz.
    pub frequency: f64,
    /// Waveform name, parsed with [`Waveform::from_str`](std::str::FromStr).
    pub waveform: String,
    /// Attack time in seconds.
    pub attack: f64,
    /// Decay time in seconds.
    pub decay: f64,
    /// Sustain level in [0, 1].
    pub sustain: f64,
    /// Release time in seconds.
    pub release: f64,
}

impl Default for ToneSettings {
    fn default() -> Self {
        let adsr = AdsrParams::default();
        Self {
            frequency: DEFAULT_FREQUENCY,
            waveform: Waveform::default().name().to_string(),
            attack: adsr.attack,
            decay: adsr.decay,
            sustain: adsr.sustain,
            release: adsr.release,
        }
    }
}

impl ToneSettings {
    /// Envelope parameters, unvalidated.
    pub fn adsr(&self) -> AdsrParams {
        AdsrParams::new(self.attack, self.decay, self.sustain, self.release)
    }

    /// Parsed waveform.
    pub fn waveform(&self) -> Result<Waveform, ConfigError> {
        Ok(self.waveform.parse::<Waveform>()?)
    }
}

/// Buffer length, amplitude and noise seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Tone length in seconds.
    pub duration_secs: f64,
    /// Fraction of full scale, in (0, 1].
    pub headroom: f64,
    /// White noise seed.
    pub noise_seed: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            headroom: DEFAULT_HEADROOM,
            noise_seed: DEFAULT_NOISE_SEED,
        }
    }
}

/// Where exported audio goes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// WAV export destination.
    pub export_path: PathBuf,
    /// Preferred playback device (substring match), `None` for the default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
            device: None,
        }
    }
}

/// Complete tonekit settings file.
///
/// Every section and key is optional; missing values take their defaults.
///
/// # Example
///
/// ```rust
/// use tonekit_config::Settings;
/// use tonekit_synth::Waveform;
///
/// let settings = Settings::from_toml("[tone]\nwaveform = \"square\"\nfrequency = 220.0").unwrap();
/// let request = settings.to_request().unwrap();
///
/// assert_eq!(request.waveform(), Waveform::Square);
/// assert_eq!(request.frequency(), 220.0);
/// assert_eq!(settings.render.duration_secs, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `[tone]` section.
    pub tone: ToneSettings,
    /// `[render]` section.
    pub render: RenderConfig,
    /// `[output]` section.
    pub output: OutputSettings,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse settings from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save settings to a TOML file, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Serialize to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Build a validated synthesis request from the `[tone]` section.
    pub fn to_request(&self) -> Result<SynthesisRequest, ConfigError> {
        let waveform = self.tone.waveform()?;
        Ok(SynthesisRequest::new(
            waveform,
            self.tone.frequency,
            self.tone.adsr(),
        )?)
    }

    /// Render settings from the `[render]` section, unvalidated.
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            duration_secs: self.render.duration_secs,
            headroom: self.render.headroom,
            noise_seed: self.render.noise_seed,
        }
    }

    /// Check every section, reporting the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.to_request()?;
        self.render_settings().validate()?;
        Ok(())
    }
}
