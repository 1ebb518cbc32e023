use thiserror::Error;
use tracing::error;

use crate::core::shutter::parse_shutter_speed;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid numeric input for {field}: '{value}'")]
    NotNumeric { field: String, value: String },

    #[error(
        "Invalid exposure time input for {field}: '{value}'. Use decimal (e.g., '0.004') or fraction (e.g., '1/250') format."
    )]
    NotExposureTime { field: String, value: String },
}

/// Empty input is accepted and means "leave the tag alone".
pub fn validate_numeric(field: &str, text: &str) -> Result<(), ValidationError> {
    if text.is_empty() || text.trim().parse::<f64>().is_ok() {
        return Ok(());
    }

    let err = ValidationError::NotNumeric {
        field: field.to_string(),
        value: text.to_string(),
    };
    error!("{err}");
    Err(err)
}

/// Like [`validate_numeric`] but also accepts fractions such as `1/250`.
pub fn validate_exposure_time(field: &str, text: &str) -> Result<(), ValidationError> {
    if text.is_empty() || parse_exposure_text(text).is_some() {
        return Ok(());
    }

    let err = ValidationError::NotExposureTime {
        field: field.to_string(),
        value: text.to_string(),
    };
    error!("{err}");
    Err(err)
}

fn parse_exposure_text(text: &str) -> Option<f64> {
    // The form shows `1/250`, never a unit suffix.
    if text.trim_end().ends_with('s') {
        return None;
    }
    parse_shutter_speed(text)
}
