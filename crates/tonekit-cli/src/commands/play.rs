//! Synthesize a tone and play it.

use super::common::{ToneArgs, load_settings, render};
use clap::Args;
use std::path::Path;
use std::time::Duration;
use tonekit_io::{DEFAULT_PLAYBACK_TIMEOUT_GRACE, PcmSink, Playback};

#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    tone: ToneArgs,

    /// Output device (partial name match, default device if omitted)
    #[arg(long)]
    device: Option<String>,

    /// Seconds to wait beyond the tone length before giving up on the device
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_PLAYBACK_TIMEOUT_GRACE.as_secs_f64())]
    timeout_grace: f64,
}

/// Build the playback sink from the command line and settings.
fn playback_sink(args: &PlayArgs, settings_device: Option<&str>) -> anyhow::Result<Playback> {
    let grace = Duration::try_from_secs_f64(args.timeout_grace).map_err(|_| {
        anyhow::anyhow!(
            "--timeout-grace must be a non-negative number of seconds, got {}",
            args.timeout_grace
        )
    })?;

    let playback = match args.device.as_deref().or(settings_device) {
        Some(name) => Playback::with_device(name),
        None => Playback::new(),
    };
    Ok(playback.with_timeout_grace(grace))
}

pub fn run(args: PlayArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let settings = load_settings(config, &args.tone)?;
    let buffer = render(&settings)?;

    let mut sink = playback_sink(&args, settings.output.device.as_deref())?;

    println!(
        "Playing {} Hz {} for {:.2}s...",
        settings.tone.frequency,
        settings.tone.waveform,
        buffer.duration_secs()
    );
    sink.consume(&buffer)?;
    println!("Done.");

    Ok(())
}
