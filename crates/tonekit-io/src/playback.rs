//! Blocking playback on a cpal output device.

use crate::sink::PcmSink;
use crate::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Host};
use std::sync::mpsc;
use std::time::Duration;
use tonekit_synth::SampleBuffer;

/// Extra time allowed beyond the buffer's duration before playback is
/// considered stalled.
pub const DEFAULT_PLAYBACK_TIMEOUT_GRACE: Duration = Duration::from_secs(2);

/// Extra wait on top of the reported output latency before the stream is
/// dropped.
const DRAIN_MARGIN: Duration = Duration::from_millis(20);

/// Fallback rate reported when a device has no default config.
const FALLBACK_SAMPLE_RATE: u32 = 44_100;

/// Device name via `description()` (cpal 0.17+).
fn device_name(device: &Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// An output device as seen by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioDevice {
    /// Human-readable device name.
    pub name: String,
    /// Default output sample rate in Hz.
    pub default_sample_rate: u32,
    /// Whether this is the host's default output device.
    pub is_default: bool,
}

/// List every output device the default host exposes.
///
/// Devices whose name cannot be read are skipped.
pub fn list_output_devices() -> Result<Vec<AudioDevice>> {
    let host = cpal::default_host();
    let default_name = host
        .default_output_device()
        .and_then(|d| device_name(&d).ok());
    let mut devices = Vec::new();

    if let Ok(outputs) = host.output_devices() {
        for device in outputs {
            if let Ok(name) = device_name(&device) {
                let default_sample_rate = device
                    .default_output_config()
                    .map(|c| c.sample_rate())
                    .unwrap_or(FALLBACK_SAMPLE_RATE);
                let is_default = default_name.as_deref() == Some(name.as_str());

                devices.push(AudioDevice {
                    name,
                    default_sample_rate,
                    is_default,
                });
            }
        }
    }

    Ok(devices)
}

/// The host's default output device, if any.
pub fn default_output_device() -> Option<AudioDevice> {
    let host = cpal::default_host();
    host.default_output_device().and_then(|d| {
        device_name(&d).ok().map(|name| AudioDevice {
            name,
            default_sample_rate: d
                .default_output_config()
                .map(|c| c.sample_rate())
                .unwrap_or(FALLBACK_SAMPLE_RATE),
            is_default: true,
        })
    })
}

/// Find an output device by case-insensitive partial name, or the default.
fn find_output_device(host: &Host, name: Option<&str>) -> Result<Device> {
    match name {
        Some(search) => {
            let search_lower = search.to_lowercase();
            let devices = host
                .output_devices()
                .map_err(|e| Error::Stream(e.to_string()))?;

            for device in devices {
                if let Ok(dev_name) = device_name(&device)
                    && dev_name.to_lowercase().contains(search_lower.as_str())
                {
                    return Ok(device);
                }
            }
            Err(Error::DeviceNotFound(format!(
                "no output device matching '{search}'"
            )))
        }
        None => host.default_output_device().ok_or(Error::NoDevice),
    }
}

/// Copies a mono signal into interleaved device buffers.
///
/// Completion is reported only once a full callback buffer of silence has
/// followed the last sample, so the tail is already queued on the device.
#[derive(Debug)]
struct FrameFeeder {
    samples: Vec<f32>,
    frame_width: usize,
    cursor: usize,
    done_at: Option<usize>,
}

impl FrameFeeder {
    fn new(samples: Vec<f32>, channels: u16) -> Self {
        Self {
            samples,
            frame_width: usize::from(channels.max(1)),
            cursor: 0,
            done_at: None,
        }
    }

    /// Fill one callback buffer. Returns `true` once playback is complete.
    fn fill(&mut self, data: &mut [f32]) -> bool {
        let mut frames = 0;
        for frame in data.chunks_mut(self.frame_width) {
            let value = self.samples.get(self.cursor).copied().unwrap_or(0.0);
            frame.fill(value);
            self.cursor += 1;
            frames += 1;
        }

        if self.done_at.is_none() && self.cursor >= self.samples.len() {
            self.done_at = Some(self.cursor + frames);
        }
        self.done_at.is_some_and(|end| self.cursor >= end)
    }
}

/// Plays buffers on an output device, blocking until each has finished.
///
/// The mono signal is copied to every channel the device opens with.
#[derive(Debug, Clone, Default)]
pub struct Playback {
    device: Option<String>,
    grace: Option<Duration>,
}

impl Playback {
    /// Play on the host's default output device.
    pub fn new() -> Self {
        Self::default()
    }

    /// Play on the first output device whose name contains `name`.
    pub fn with_device(name: impl Into<String>) -> Self {
        Self {
            device: Some(name.into()),
            grace: None,
        }
    }

    /// Override [`DEFAULT_PLAYBACK_TIMEOUT_GRACE`].
    pub fn with_timeout_grace(mut self, grace: Duration) -> Self {
        self.grace = Some(grace);
        self
    }

    /// Time allowed beyond the buffer's duration before playback fails.
    pub fn timeout_grace(&self) -> Duration {
        self.grace.unwrap_or(DEFAULT_PLAYBACK_TIMEOUT_GRACE)
    }

    /// Requested device name, `None` for the default.
    pub fn device(&self) -> Option<&str> {
        self.device.as_deref()
    }

    /// Play `buffer` to completion.
    pub fn play(&self, buffer: &SampleBuffer) -> Result<()> {
        if buffer.is_empty() {
            return Ok(());
        }

        let host = cpal::default_host();
        let device = find_output_device(&host, self.device.as_deref())?;
        let channels = device
            .default_output_config()
            .map_err(|e| Error::Stream(e.to_string()))?
            .channels()
            .max(1);

        tracing::info!(
            device = %device_name(&device).unwrap_or_default(),
            channels,
            sample_rate = buffer.sample_rate(),
            samples = buffer.len(),
            "starting playback"
        );

        let stream_config = cpal::StreamConfig {
            channels,
            sample_rate: buffer.sample_rate(),
            buffer_size: cpal::BufferSize::Default,
        };

        let mut feeder = FrameFeeder::new(buffer.to_f32(), channels);
        // Carries the output latency reported by the final callback.
        let (done_tx, done_rx) = mpsc::sync_channel::<Duration>(1);

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], info: &cpal::OutputCallbackInfo| {
                    if feeder.fill(data) {
                        let timestamp = info.timestamp();
                        let latency = timestamp
                            .playback
                            .duration_since(&timestamp.callback)
                            .unwrap_or_default();
                        // Full channel means completion was already signalled.
                        let _ = done_tx.try_send(latency);
                    }
                },
                |err| tracing::warn!(error = %err, "output stream error"),
                None,
            )
            .map_err(|e| Error::Stream(e.to_string()))?;

        stream.play().map_err(|e| Error::Stream(e.to_string()))?;

        let timeout =
            Duration::from_secs_f64(buffer.duration_secs()).saturating_add(self.timeout_grace());
        let latency = done_rx.recv_timeout(timeout).map_err(|_| {
            Error::Stream(format!(
                "playback did not finish within {:.2}s",
                timeout.as_secs_f64()
            ))
        })?;

        std::thread::sleep(latency + DRAIN_MARGIN);
        drop(stream);
        tracing::debug!(latency_ms = latency.as_millis() as u64, "playback finished");
        Ok(())
    }
}

impl PcmSink for Playback {
    fn name(&self) -> &str {
        "playback"
    }

    fn consume(&mut self, buffer: &SampleBuffer) -> Result<()> {
        self.play(buffer)
    }
}
