//! Settings file inspection and creation.

use anyhow::Context;
use clap::{Args, Subcommand};
use std::path::Path;
use tonekit_config::{Settings, ensure_user_config_dir, load_or_default, settings_path};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective settings as TOML
    Show,

    /// Write a settings file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: ConfigArgs, config: Option<&Path>) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let settings = load_or_default(config).context("failed to load settings")?;
            print!("{}", settings.to_toml()?);
        }
        ConfigCommand::Init { force } => {
            let path = match config {
                Some(path) => path.to_path_buf(),
                None => {
                    ensure_user_config_dir()?;
                    settings_path()
                }
            };

            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }

            Settings::default().save(&path)?;
            tracing::info!(path = %path.display(), "wrote default settings");
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}
