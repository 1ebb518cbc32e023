use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::lens_info::decode_lens_info;
use crate::models::tag::{
    exif_key, LENS_INFO, LONG_APERTURE_VALUE, LONG_FOCAL_LENGTH, WIDE_APERTURE_VALUE,
    WIDE_FOCAL_LENGTH,
};

/// One file's metadata as exiftool reports it with `-G`: group-qualified
/// keys such as `EXIF:Make` mapped to raw JSON values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataRecord(BTreeMap<String, Value>);

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// String form of a value. Numbers are rendered, `null` counts as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::Null => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.0.get(key)? {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy of the record with `LensInfo` also spelled out as the four
    /// pseudo-fields lens presets store, so those presets can match real files.
    pub fn with_lens_fields(&self) -> Self {
        let mut record = self.clone();
        let Some(parts) = self
            .text(&exif_key(LENS_INFO))
            .and_then(|lens_info| decode_lens_info(&lens_info))
        else {
            return record;
        };

        let names = [
            WIDE_FOCAL_LENGTH,
            LONG_FOCAL_LENGTH,
            WIDE_APERTURE_VALUE,
            LONG_APERTURE_VALUE,
        ];
        for (name, value) in names.into_iter().zip(parts) {
            let key = exif_key(name);
            if !record.contains_key(&key) {
                record.insert(key, value);
            }
        }
        record
    }
}
