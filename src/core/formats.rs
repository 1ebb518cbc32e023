use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff"];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Bmp,
    Tiff,
    Unknown,
}

impl ImageFormat {
    pub fn is_unknown(self) -> bool {
        self == Self::Unknown
    }
}

pub fn detect_format(path: &Path) -> ImageFormat {
    let Some(ext) = path.extension().and_then(|value| value.to_str()) else {
        return ImageFormat::Unknown;
    };

    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => ImageFormat::Jpeg,
        "png" => ImageFormat::Png,
        "bmp" => ImageFormat::Bmp,
        "tif" | "tiff" => ImageFormat::Tiff,
        _ => ImageFormat::Unknown,
    }
}

pub fn is_supported(path: &Path) -> bool {
    !detect_format(path).is_unknown()
}

/// Expands directories one level deep and keeps supported images, sorted.
pub fn collect_images<I, P>(paths: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut images = Vec::new();

    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            match fs::read_dir(path) {
                Ok(entries) => images.extend(
                    entries
                        .filter_map(|entry| entry.ok())
                        .map(|entry| entry.path())
                        .filter(|child| child.is_file() && is_supported(child)),
                ),
                Err(err) => warn!(path = %path.display(), "cannot list directory: {err}"),
            }
        } else if is_supported(path) {
            images.push(path.to_path_buf());
        }
    }

    images.sort();
    images.dedup();
    images
}
