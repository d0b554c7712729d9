//! Settings management for tonekit.
//!
//! A single TOML file describes the tone to synthesize, how it is rendered
//! and where exported audio is written:
//!
//! ```toml
//! [tone]
//! frequency = 440.0
//! waveform = "sine"
//! attack = 0.1
//! decay = 0.2
//! sustain = 0.5
//! release = 0.3
//!
//! [render]
//! duration_secs = 1.0
//! headroom = 1.0
//! noise_seed = 305419896
//!
//! [output]
//! export_path = "output.wav"
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use tonekit_config::{Settings, paths};
//!
//! let settings = paths::load_or_default(None).unwrap();
//! let request = settings.to_request().unwrap();
//!
//! let mut quieter = settings.clone();
//! quieter.render.headroom = 0.5;
//! quieter.save(paths::settings_path()).unwrap();
//! ```

mod error;
mod settings;

/// Platform-specific paths for the settings file.
pub mod paths;

pub use error::ConfigError;
pub use paths::{ensure_user_config_dir, load_or_default, settings_path, user_config_dir};
pub use settings::{OutputSettings, RenderConfig, Settings, ToneSettings};
