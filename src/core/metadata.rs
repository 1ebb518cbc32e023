use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::models::{MetadataRecord, Tags};

pub const DEFAULT_EXECUTABLE: &str = "exiftool";

/// Arguments shared by reads and writes: group-qualified keys, numeric values.
pub const COMMON_ARGS: [&str; 2] = ["-G", "-n"];

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to run {}: {source}", .executable.display())]
    Spawn {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("exiftool exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("failed to parse exiftool output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("exiftool returned no metadata for {}", .0.display())]
    EmptyOutput(PathBuf),
}

pub type Result<T> = std::result::Result<T, MetadataError>;

/// Reads and writes tags by running the external `exiftool` program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataEngine {
    executable: PathBuf,
}

impl Default for MetadataEngine {
    fn default() -> Self {
        Self::new(DEFAULT_EXECUTABLE)
    }
}

impl MetadataEngine {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Uses the configured executable when it points at a file, otherwise
    /// whatever `exiftool` resolves to on `PATH`.
    pub fn locate(configured: Option<&Path>) -> Self {
        match configured {
            Some(path) if path.is_file() => Self::new(path),
            Some(path) => {
                debug!(path = %path.display(), "configured exiftool is not a file, using PATH");
                Self::default()
            }
            None => Self::default(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn read(&self, path: &Path) -> Result<MetadataRecord> {
        if !path.exists() {
            return Err(MetadataError::FileNotFound(path.to_path_buf()));
        }

        let output = self.run(Self::read_args(path)).inspect_err(|err| {
            error!("Error loading EXIF for \"{}\": {err}", path.display());
        })?;

        let record = parse_json_output(&output.stdout, path)?;
        info!("Loaded EXIF for \"{}\"", path.display());
        Ok(record)
    }

    pub fn write(&self, path: &Path, tags: &Tags) -> Result<()> {
        if !path.exists() {
            return Err(MetadataError::FileNotFound(path.to_path_buf()));
        }

        self.run(Self::write_args(path, tags)).inspect_err(|err| {
            error!("Error saving EXIF to \"{}\": {err}", path.display());
        })?;

        info!("Saved EXIF to \"{}\": {tags:?}", path.display());
        Ok(())
    }

    pub fn read_args(path: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![OsString::from("-j")];
        args.extend(COMMON_ARGS.iter().map(OsString::from));
        args.push(path.as_os_str().to_owned());
        args
    }

    /// `-G -n -overwrite_original -Tag=Value ... <path>`.
    pub fn write_args(path: &Path, tags: &Tags) -> Vec<OsString> {
        let mut args: Vec<OsString> = COMMON_ARGS.iter().map(OsString::from).collect();
        args.push(OsString::from("-overwrite_original"));
        args.extend(
            tags.iter()
                .map(|(tag, value)| OsString::from(format!("-{tag}={value}"))),
        );
        args.push(path.as_os_str().to_owned());
        args
    }

    fn run(&self, args: Vec<OsString>) -> Result<Output> {
        debug!(executable = %self.executable.display(), ?args, "running exiftool");

        let output = Command::new(&self.executable)
            .args(&args)
            .output()
            .map_err(|source| MetadataError::Spawn {
                executable: self.executable.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(MetadataError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output)
    }
}

/// exiftool's `-j` output is an array with one object per file.
pub fn parse_json_output(stdout: &[u8], path: &Path) -> Result<MetadataRecord> {
    let value: Value = serde_json::from_slice(stdout)?;
    let first = match value {
        Value::Array(items) => items.into_iter().next(),
        object @ Value::Object(_) => Some(object),
        _ => None,
    };

    match first {
        Some(object @ Value::Object(_)) => Ok(serde_json::from_value(object)?),
        _ => Err(MetadataError::EmptyOutput(path.to_path_buf())),
    }
}
