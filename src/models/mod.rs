mod form;
mod operation;
mod photo;
mod preset;
mod record;
pub mod tag;

use std::collections::BTreeMap;

pub use form::EditForm;
pub use operation::{OperationResult, OperationSummary, ProgressEvent};
pub use photo::{PhotoEntry, DONE_MARK};
pub use preset::{FieldValues, Preset, PresetKind, NULL_PRESET_NAME};
pub use record::MetadataRecord;
pub use tag::{MetadataTag, TagCategory, TagGroup, TagValue};

/// Tag name to value, as written with `exiftool -Tag=Value`.
pub type Tags = BTreeMap<String, String>;
