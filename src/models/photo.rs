use std::path::PathBuf;

use crate::core::formats::{detect_format, ImageFormat};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PhotoEntry {
    pub path: PathBuf,
    pub filename: String,
    pub format: ImageFormat,
    pub done: bool,
}

impl PhotoEntry {
    pub fn from_path(path: PathBuf) -> Self {
        let filename = path
            .file_name()
            .map(|value| value.to_string_lossy().to_string())
            .unwrap_or_else(|| String::from("unknown"));
        let format = detect_format(&path);

        Self {
            path,
            filename,
            format,
            done: false,
        }
    }

    /// File name with a check mark once saved, as the file list shows it.
    pub fn label(&self) -> String {
        if self.done {
            format!("{DONE_MARK}{}", self.filename)
        } else {
            self.filename.clone()
        }
    }
}

pub const DONE_MARK: &str = "✓ ";
