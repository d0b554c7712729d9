//! Destinations for finished sample buffers.
//!
//! [`PcmSink`] decouples the synthesis front end from where audio ends up.
//! The trait is object-safe so the destination can be chosen at runtime:
//!
//! ```text
//!   SampleBuffer ──▶ Box<dyn PcmSink>
//!                        ├── WavExporter  (file)
//!                        └── Playback     (cpal output device)
//! ```

use crate::Result;
use crate::wav::write_wav;
use std::path::{Path, PathBuf};
use tonekit_synth::{DEFAULT_EXPORT_PATH, SampleBuffer};

/// A consumer of mono 16-bit PCM buffers.
///
/// `consume` is blocking: when it returns, the buffer has been fully written
/// or played.
pub trait PcmSink {
    /// Human-readable name of this sink (e.g., "wav", "playback").
    fn name(&self) -> &str;

    /// Hand a finished buffer to the sink.
    fn consume(&mut self, buffer: &SampleBuffer) -> Result<()>;
}

/// Writes each buffer to a WAV file, replacing any existing file.
#[derive(Debug, Clone)]
pub struct WavExporter {
    path: PathBuf,
}

impl WavExporter {
    /// Export to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Destination file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for WavExporter {
    /// Export to `output.wav` in the working directory.
    fn default() -> Self {
        Self::new(DEFAULT_EXPORT_PATH)
    }
}

impl PcmSink for WavExporter {
    fn name(&self) -> &str {
        "wav"
    }

    fn consume(&mut self, buffer: &SampleBuffer) -> Result<()> {
        write_wav(&self.path, buffer)?;
        tracing::info!(
            path = %self.path.display(),
            samples = buffer.len(),
            "exported WAV"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wav::read_wav;

    /// Collects buffers in memory.
    #[derive(Default)]
    struct MemorySink {
        received: Vec<SampleBuffer>,
    }

    impl PcmSink for MemorySink {
        fn name(&self) -> &str {
            "memory"
        }

        fn consume(&mut self, buffer: &SampleBuffer) -> Result<()> {
            self.received.push(buffer.clone());
            Ok(())
        }
    }

    #[test]
    fn test_default_path_is_output_wav() {
        let exporter = WavExporter::default();
        assert_eq!(exporter.path(), Path::new("output.wav"));
        assert_eq!(exporter.name(), "wav");
    }

    #[test]
    fn test_exporter_writes_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let mut exporter = WavExporter::new(&path);

        exporter.consume(&SampleBuffer::new(vec![5; 10])).unwrap();
        exporter.consume(&SampleBuffer::new(vec![-7; 4])).unwrap();

        let loaded = read_wav(&path).unwrap();
        assert_eq!(loaded.samples(), &[-7, -7, -7, -7]);
    }

    #[test]
    fn test_sinks_are_object_safe() {
        let mut sinks: Vec<Box<dyn PcmSink>> = vec![Box::new(MemorySink::default())];
        let buffer = SampleBuffer::new(vec![1, 2, 3]);
        for sink in &mut sinks {
            sink.consume(&buffer).unwrap();
            assert_eq!(sink.name(), "memory");
        }
    }

    #[test]
    fn test_exporter_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = WavExporter::new(dir.path().join("missing").join("tone.wav"));
        assert!(exporter.consume(&SampleBuffer::new(vec![0; 4])).is_err());
    }
}
