use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone};

use crate::core::offset::to_fixed_offset;

pub const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";
/// Seconds are always written as zero.
pub const EXIF_DATETIME_WRITE_FORMAT: &str = "%Y:%m:%d %H:%M:00";

/// A one-keystroke nudge of the capture time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AdjustmentStep {
    pub label: &'static str,
    pub shortcut: char,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

pub const ADJUSTMENT_STEPS: [AdjustmentStep; 8] = [
    step("+1d", 'Y', 1, 0, 0),
    step("-1d", 'H', -1, 0, 0),
    step("+01:00", 'U', 0, 1, 0),
    step("-01:00", 'J', 0, -1, 0),
    step("+00:10", 'I', 0, 0, 10),
    step("-00:10", 'K', 0, 0, -10),
    step("+00:01", 'O', 0, 0, 1),
    step("-00:01", 'L', 0, 0, -1),
];

const fn step(
    label: &'static str,
    shortcut: char,
    days: i64,
    hours: i64,
    minutes: i64,
) -> AdjustmentStep {
    AdjustmentStep {
        label,
        shortcut,
        days,
        hours,
        minutes,
    }
}

impl AdjustmentStep {
    pub fn apply(&self, value: NaiveDateTime) -> NaiveDateTime {
        adjust(value, self.days, self.hours, self.minutes)
    }
}

pub fn step_for_shortcut(shortcut: char) -> Option<&'static AdjustmentStep> {
    let shortcut = shortcut.to_ascii_uppercase();
    ADJUSTMENT_STEPS.iter().find(|step| step.shortcut == shortcut)
}

/// Parses `YYYY:MM:DD HH:MM:SS`. Trailing sub-second or zone text is ignored.
pub fn parse_exif_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    let head = text.get(..19).unwrap_or(text);
    NaiveDateTime::parse_from_str(head, EXIF_DATETIME_FORMAT).ok()
}

pub fn format_exif_datetime(value: NaiveDateTime) -> String {
    value.format(EXIF_DATETIME_WRITE_FORMAT).to_string()
}

pub fn adjust(value: NaiveDateTime, days: i64, hours: i64, minutes: i64) -> NaiveDateTime {
    value + Duration::days(days) + Duration::hours(hours) + Duration::minutes(minutes)
}

/// Pins a local capture time to its hour offset.
pub fn with_offset(value: NaiveDateTime, offset_hours: f64) -> Option<DateTime<FixedOffset>> {
    to_fixed_offset(offset_hours)?
        .from_local_datetime(&value)
        .single()
}
