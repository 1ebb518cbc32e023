use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::tag::{
    LENS_MAKE, LENS_MODEL, LENS_SERIAL_NUMBER, LONG_APERTURE_VALUE, LONG_FOCAL_LENGTH, MAKE,
    MODEL, WIDE_APERTURE_VALUE, WIDE_FOCAL_LENGTH,
};

/// Placeholder entry meaning "no preset selected". Never persisted.
pub const NULL_PRESET_NAME: &str = "(None)";

/// Field name to text value, e.g. `Make` -> `Nikon`.
pub type FieldValues = BTreeMap<String, String>;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PresetKind {
    Camera,
    Lens,
}

impl PresetKind {
    pub const ALL: [PresetKind; 2] = [PresetKind::Camera, PresetKind::Lens];

    pub fn label(self) -> &'static str {
        match self {
            Self::Camera => "cameras",
            Self::Lens => "lenses",
        }
    }

    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Camera => "preset_cameras",
            Self::Lens => "preset_lenses",
        }
    }

    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Camera => &[MAKE, MODEL],
            Self::Lens => &[
                LENS_MAKE,
                LENS_MODEL,
                WIDE_FOCAL_LENGTH,
                LONG_FOCAL_LENGTH,
                WIDE_APERTURE_VALUE,
                LONG_APERTURE_VALUE,
                LENS_SERIAL_NUMBER,
            ],
        }
    }
}

/// Stored as a flat object: `{"Name": "My Nikon", "Make": "Nikon", ...}`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(flatten)]
    pub fields: FieldValues,
}

impl Preset {
    pub fn new(name: impl Into<String>, fields: FieldValues) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn none() -> Self {
        Self::new(NULL_PRESET_NAME, FieldValues::new())
    }

    pub fn is_none(&self) -> bool {
        self.name == NULL_PRESET_NAME
    }
}
