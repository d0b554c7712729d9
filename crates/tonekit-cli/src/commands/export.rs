//! Synthesize a tone and write it to a WAV file.

use super::common::{ToneArgs, load_settings, render};
use clap::Args;
use std::path::{Path, PathBuf};
use tonekit_io::{PcmSink, WavExporter};

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    tone: ToneArgs,

    /// Output WAV file (defaults to the settings export path)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

pub fn run(args: ExportArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let settings = load_settings(config, &args.tone)?;
    let buffer = render(&settings)?;

    let path = args
        .output
        .unwrap_or_else(|| settings.output.export_path.clone());
    let mut sink = WavExporter::new(&path);
    sink.consume(&buffer)?;

    println!(
        "Exported {} samples ({:.2}s) to {}",
        buffer.len(),
        buffer.duration_secs(),
        path.display()
    );

    Ok(())
}
