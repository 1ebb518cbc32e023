use chrono::{Local, NaiveDateTime};
use serde_json::Value;

use crate::core::datetime::{format_exif_datetime, parse_exif_datetime};
use crate::core::lens_info::{decode_lens_info, encode_lens_info};
use crate::core::offset::{clamp_offset, format_offset, parse_offset};
use crate::core::shutter::format_shutter_speed;
use crate::core::validation::{validate_exposure_time, validate_numeric, ValidationError};
use crate::models::tag::*;
use crate::models::{FieldValues, MetadataRecord, PresetKind, Tags};

/// The editable values for one save, independent of any widget toolkit.
#[derive(Clone, Debug, PartialEq)]
pub struct EditForm {
    pub make: String,
    pub model: String,
    pub lens_make: String,
    pub lens_model: String,
    pub wide_focal_length: String,
    pub long_focal_length: String,
    pub wide_aperture_value: String,
    pub long_aperture_value: String,
    pub lens_serial_number: String,
    pub focal_length: String,
    pub f_number: String,
    pub iso: String,
    pub exposure_time: String,
    pub date_time_original: NaiveDateTime,
    pub offset: f64,
}

impl Default for EditForm {
    fn default() -> Self {
        Self::new(Local::now().naive_local())
    }
}

impl EditForm {
    pub fn new(date_time_original: NaiveDateTime) -> Self {
        Self {
            make: String::new(),
            model: String::new(),
            lens_make: String::new(),
            lens_model: String::new(),
            wide_focal_length: String::new(),
            long_focal_length: String::new(),
            wide_aperture_value: String::new(),
            long_aperture_value: String::new(),
            lens_serial_number: String::new(),
            focal_length: String::new(),
            f_number: String::new(),
            iso: String::new(),
            exposure_time: String::new(),
            date_time_original,
            offset: 0.0,
        }
    }

    /// Empties every text field and resets the capture time and offset.
    pub fn clear(&mut self, now: NaiveDateTime) {
        *self = Self::new(now);
    }

    /// Text field by its metadata name. Covers preset fields and the
    /// exposure fields; the capture time and offset are not text.
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            MAKE => &self.make,
            MODEL => &self.model,
            LENS_MAKE => &self.lens_make,
            LENS_MODEL => &self.lens_model,
            WIDE_FOCAL_LENGTH => &self.wide_focal_length,
            LONG_FOCAL_LENGTH => &self.long_focal_length,
            WIDE_APERTURE_VALUE => &self.wide_aperture_value,
            LONG_APERTURE_VALUE => &self.long_aperture_value,
            LENS_SERIAL_NUMBER => &self.lens_serial_number,
            FOCAL_LENGTH => &self.focal_length,
            F_NUMBER => &self.f_number,
            ISO => &self.iso,
            EXPOSURE_TIME => &self.exposure_time,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Returns `false` for names that are not text fields.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        let slot = match name {
            MAKE => &mut self.make,
            MODEL => &mut self.model,
            LENS_MAKE => &mut self.lens_make,
            LENS_MODEL => &mut self.lens_model,
            WIDE_FOCAL_LENGTH => &mut self.wide_focal_length,
            LONG_FOCAL_LENGTH => &mut self.long_focal_length,
            WIDE_APERTURE_VALUE => &mut self.wide_aperture_value,
            LONG_APERTURE_VALUE => &mut self.long_aperture_value,
            LENS_SERIAL_NUMBER => &mut self.lens_serial_number,
            FOCAL_LENGTH => &mut self.focal_length,
            F_NUMBER => &mut self.f_number,
            ISO => &mut self.iso,
            EXPOSURE_TIME => &mut self.exposure_time,
            _ => return false,
        };
        *slot = value.into();
        true
    }

    /// Current values of the fields a preset of `kind` stores.
    pub fn preset_fields(&self, kind: PresetKind) -> FieldValues {
        kind.fields()
            .iter()
            .map(|name| {
                let value = self.field(name).unwrap_or_default().to_string();
                (name.to_string(), value)
            })
            .collect()
    }

    pub fn apply_preset_fields(&mut self, values: &FieldValues) {
        for (name, value) in values {
            self.set_field(name, value.as_str());
        }
    }

    /// Emptying the wide focal length also empties the long one.
    pub fn set_wide_focal_length(&mut self, text: impl Into<String>) {
        self.wide_focal_length = text.into();
        if self.wide_focal_length.is_empty() {
            self.long_focal_length.clear();
        }
    }

    /// Emptying the wide aperture empties the long one; a wide aperture on a
    /// prime lens doubles as the f-number when none is set yet.
    pub fn set_wide_aperture_value(&mut self, text: impl Into<String>) {
        self.wide_aperture_value = text.into();
        if self.wide_aperture_value.is_empty() {
            self.long_aperture_value.clear();
        } else if self.f_number.is_empty() && self.long_aperture_value.is_empty() {
            self.f_number = self.wide_aperture_value.clone();
        }
    }

    /// A prime lens's focal length is also the shot's focal length.
    pub fn finish_wide_focal_length(&mut self) {
        if !self.wide_focal_length.is_empty()
            && self.focal_length.is_empty()
            && self.long_focal_length.is_empty()
        {
            self.focal_length = self.wide_focal_length.clone();
        }
    }

    pub fn finish_wide_aperture_value(&mut self) {
        if !self.wide_aperture_value.is_empty()
            && self.f_number.is_empty()
            && self.long_aperture_value.is_empty()
        {
            self.f_number = self.wide_aperture_value.clone();
        }
    }

    /// Fills the form from a file's metadata. Fields the file lacks keep
    /// their current value.
    pub fn populate(&mut self, record: &MetadataRecord) {
        for kind in PresetKind::ALL {
            for name in kind.fields() {
                if let Some(value) = record.get(&exif_key(name)).and_then(render_value) {
                    self.set_field(name, value);
                }
            }
        }

        for name in [EXPOSURE_TIME, SHUTTER_SPEED_VALUE] {
            let key = exif_key(name);
            if !record.contains_key(&key) {
                continue;
            }
            match record.number(&key) {
                Some(seconds) if seconds > 0.0 => {
                    self.exposure_time = format_shutter_speed(seconds);
                }
                _ => {
                    if let Some(text) = record.text(&key) {
                        self.exposure_time = text;
                    }
                }
            }
            break;
        }

        if let Some(captured) = record
            .text(&exif_key(DATE_TIME_ORIGINAL))
            .and_then(|text| parse_exif_datetime(&text))
        {
            self.date_time_original = captured;
        }

        if let Some(offset) = [OFFSET_TIME_ORIGINAL, OFFSET_TIME]
            .iter()
            .find_map(|name| record.text(&exif_key(name)))
        {
            self.offset = clamp_offset(parse_offset(&offset));
        }

        if let Some([wide_focal, long_focal, wide_aperture, long_aperture]) = record
            .text(&exif_key(LENS_INFO))
            .and_then(|text| decode_lens_info(&text))
        {
            self.wide_focal_length = wide_focal;
            self.long_focal_length = long_focal;
            self.wide_aperture_value = wide_aperture;
            self.long_aperture_value = long_aperture;
        }
    }

    /// Checks every numeric field, stopping at the first bad one.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_numeric(ISO, &self.iso)?;
        validate_exposure_time(EXPOSURE_TIME, &self.exposure_time)?;
        validate_numeric(F_NUMBER, &self.f_number)?;
        validate_numeric(FOCAL_LENGTH, strip_mm(&self.focal_length))?;
        validate_numeric(WIDE_FOCAL_LENGTH, &self.wide_focal_length)?;
        validate_numeric(LONG_FOCAL_LENGTH, &self.long_focal_length)?;
        validate_numeric(WIDE_APERTURE_VALUE, &self.wide_aperture_value)?;
        validate_numeric(LONG_APERTURE_VALUE, &self.long_aperture_value)?;
        Ok(())
    }

    /// Tags to hand to exiftool. Empty values are left out so they do not
    /// clear existing tags.
    pub fn to_tags(&self) -> Tags {
        let offset = format_offset(self.offset);
        let lens_info = encode_lens_info(
            &self.wide_focal_length,
            &self.long_focal_length,
            &self.wide_aperture_value,
            &self.long_aperture_value,
        );

        let tags = [
            (DATE_TIME_ORIGINAL, format_exif_datetime(self.date_time_original)),
            (OFFSET_TIME_ORIGINAL, offset.clone()),
            (OFFSET_TIME, offset),
            (MAKE, self.make.clone()),
            (MODEL, self.model.clone()),
            (MAX_APERTURE_VALUE, self.wide_aperture_value.clone()),
            (ISO, self.iso.clone()),
            (LENS_MAKE, self.lens_make.clone()),
            (LENS_MODEL, self.lens_model.clone()),
            (LENS_INFO, lens_info),
            (LENS_SERIAL_NUMBER, self.lens_serial_number.clone()),
            (FOCAL_LENGTH, strip_mm(&self.focal_length).to_string()),
            (F_NUMBER, self.f_number.clone()),
            (EXPOSURE_TIME, self.exposure_time.clone()),
            (SHUTTER_SPEED_VALUE, self.exposure_time.clone()),
        ];

        tags.into_iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }
}

fn strip_mm(text: &str) -> &str {
    text.strip_suffix("mm").unwrap_or(text)
}

/// Form text for a raw metadata value; floats are kept to three decimals.
fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.is_f64() => {
            let rounded = (number.as_f64()? * 1000.0).round() / 1000.0;
            Some(rounded.to_string())
        }
        other => Some(other.to_string()),
    }
}
