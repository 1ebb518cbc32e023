use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const EXIF_GROUP: &str = "EXIF";

pub const MAKE: &str = "Make";
pub const MODEL: &str = "Model";
pub const LENS_MAKE: &str = "LensMake";
pub const LENS_MODEL: &str = "LensModel";
pub const LENS_INFO: &str = "LensInfo";
pub const LENS_SERIAL_NUMBER: &str = "LensSerialNumber";
pub const FOCAL_LENGTH: &str = "FocalLength";
pub const F_NUMBER: &str = "FNumber";
pub const ISO: &str = "ISO";
pub const EXPOSURE_TIME: &str = "ExposureTime";
pub const SHUTTER_SPEED_VALUE: &str = "ShutterSpeedValue";
pub const DATE_TIME_ORIGINAL: &str = "DateTimeOriginal";
pub const OFFSET_TIME_ORIGINAL: &str = "OffsetTimeOriginal";
pub const OFFSET_TIME: &str = "OffsetTime";
pub const MAX_APERTURE_VALUE: &str = "MaxApertureValue";

// Not EXIF tags: the halves of `LensInfo` as the edit form and lens presets
// hold them.
pub const WIDE_FOCAL_LENGTH: &str = "WideFocalLength";
pub const LONG_FOCAL_LENGTH: &str = "LongFocalLength";
pub const WIDE_APERTURE_VALUE: &str = "WideApertureValue";
pub const LONG_APERTURE_VALUE: &str = "LongApertureValue";

pub fn exif_key(name: &str) -> String {
    format!("{EXIF_GROUP}:{name}")
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetadataTag {
    pub key: String,
    pub group: String,
    pub name: String,
    pub display_name: String,
    pub value: TagValue,
    pub category: TagCategory,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TagGroup {
    pub name: String,
    pub tags: Vec<MetadataTag>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TagValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    List(Vec<TagValue>),
    Unknown(String),
}

impl From<&Value> for TagValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text.clone()),
            Value::Number(number) => match number.as_i64() {
                Some(integer) => Self::Integer(integer),
                None => Self::Float(number.as_f64().unwrap_or(f64::NAN)),
            },
            Value::Bool(flag) => Self::Bool(*flag),
            Value::Array(items) => Self::List(items.iter().map(Self::from).collect()),
            Value::Null => Self::Unknown(String::new()),
            Value::Object(_) => Self::Unknown(value.to_string()),
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::Unknown(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum TagCategory {
    Camera,
    Capture,
    Location,
    DateTime,
    Image,
    Description,
    Software,
    Other,
}

impl TagCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Camera => "Camera",
            Self::Capture => "Capture",
            Self::Location => "Location",
            Self::DateTime => "Date/Time",
            Self::Image => "Image",
            Self::Description => "Description",
            Self::Software => "Software",
            Self::Other => "Other",
        }
    }
}
