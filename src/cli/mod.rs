pub mod config_command;
pub mod offset_command;
pub mod preset_command;
pub mod show_command;
pub mod write_command;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::cli::config_command::ConfigArgs;
use crate::cli::offset_command::OffsetArgs;
use crate::cli::preset_command::PresetArgs;
use crate::cli::show_command::ShowArgs;
use crate::cli::write_command::WriteArgs;
use crate::core::metadata::MetadataEngine;
use crate::models::PresetKind;
use crate::settings::{AppHome, JsonFileSettings, SettingsStore, EXIFTOOL_KEY};

pub type SharedSettings = Rc<RefCell<JsonFileSettings>>;

#[derive(Parser, PartialEq, Debug)]
#[clap(version, about = "Batch-edit capture time, timezone offset, camera and lens EXIF tags")]
pub struct Cli {
    #[clap(flatten)]
    pub global_args: GlobalArgs,

    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn invoke(self) -> anyhow::Result<()> {
        self.command.invoke(&self.global_args)
    }
}

#[derive(Args, Clone, Default, PartialEq, Debug)]
pub struct GlobalArgs {
    /// Log at debug level (RUST_LOG overrides this)
    #[clap(long, global = true)]
    pub debug: bool,

    /// Directory holding settings.json instead of the platform config dir
    #[clap(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn app_home(&self) -> anyhow::Result<AppHome> {
        match &self.config_dir {
            Some(dir) => Ok(AppHome(dir.clone())),
            None => Ok(AppHome::resolve()?),
        }
    }

    pub fn open_settings(&self) -> anyhow::Result<SharedSettings> {
        let home = self.app_home()?;
        let settings = home
            .open_settings()
            .with_context(|| format!("failed to open settings in {}", home.display()))?;
        Ok(Rc::new(RefCell::new(settings)))
    }
}

pub fn metadata_engine(settings: &SharedSettings) -> MetadataEngine {
    let configured = settings.get_string(EXIFTOOL_KEY).map(PathBuf::from);
    MetadataEngine::locate(configured.as_deref())
}

#[derive(Subcommand, PartialEq, Debug)]
pub enum Command {
    /// Print a file's tags grouped the way the tag tree shows them
    Show(ShowArgs),

    /// Write capture time, offset, camera and lens tags to files
    Write(WriteArgs),

    /// Manage camera and lens presets
    Preset(PresetArgs),

    /// Show or change settings
    Config(ConfigArgs),

    /// Convert timezone offsets between hours and ±HH:MM
    Offset(OffsetArgs),
}

impl Command {
    pub fn invoke(self, global: &GlobalArgs) -> anyhow::Result<()> {
        match self {
            Command::Show(args) => args.invoke(global),
            Command::Write(args) => args.invoke(global),
            Command::Preset(args) => args.invoke(global),
            Command::Config(args) => args.invoke(global),
            Command::Offset(args) => args.invoke(),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Default, PartialEq, Eq, Debug)]
pub enum KindArg {
    #[default]
    Camera,
    Lens,
}

impl From<KindArg> for PresetKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Camera => PresetKind::Camera,
            KindArg::Lens => PresetKind::Lens,
        }
    }
}
