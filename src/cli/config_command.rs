use std::path::PathBuf;

use anyhow::bail;
use clap::{Args, Subcommand};
use serde_json::Value;

use crate::cli::{metadata_engine, GlobalArgs};
use crate::settings::{SettingsStore, EXIFTOOL_KEY};

#[derive(Args, Clone, PartialEq, Debug)]
pub struct ConfigArgs {
    #[clap(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Clone, PartialEq, Debug)]
pub enum ConfigCommand {
    /// Print the settings file and the exiftool in use
    Show,

    /// Remember the exiftool executable to use
    SetExiftool { path: PathBuf },
}

impl ConfigArgs {
    pub fn invoke(self, global: &GlobalArgs) -> anyhow::Result<()> {
        let settings = global.open_settings()?;

        match self.command {
            ConfigCommand::Show => {
                println!("settings: {}", settings.borrow().path().display());
                println!("exiftool: {}", metadata_engine(&settings).executable().display());
            }
            ConfigCommand::SetExiftool { path } => {
                if !path.is_file() {
                    bail!("exiftool not found at {}", path.display());
                }
                let mut settings = settings;
                settings.set(EXIFTOOL_KEY, Value::String(path.display().to_string()));
                println!("Setting exiftool path to {}", path.display());
            }
        }
        Ok(())
    }
}
