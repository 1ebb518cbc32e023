use chrono::FixedOffset;

pub const MIN_OFFSET: f64 = -14.0;
pub const MAX_OFFSET: f64 = 14.0;

pub fn clamp_offset(value: f64) -> f64 {
    value.clamp(MIN_OFFSET, MAX_OFFSET)
}

/// Renders an hour offset as `±HH:MM`.
///
/// Out-of-range values are formatted as given; callers clamp first. `NaN`
/// has no sign or size and renders as `+00:00`.
pub fn format_offset(value: f64) -> String {
    if value.is_nan() {
        return String::from("+00:00");
    }

    let sign = if value >= 0.0 { '+' } else { '-' };
    // Whole minutes in f64 so huge inputs cannot overflow; a rounded 60
    // lands in the hour on its own.
    let total_minutes = (value.abs() * 60.0).round();
    let hours = (total_minutes / 60.0).floor();
    let minutes = if total_minutes.is_finite() {
        total_minutes % 60.0
    } else {
        0.0
    };

    format!("{sign}{hours:02.0}:{minutes:02.0}")
}

/// Best-effort parse of a timezone offset into hours.
///
/// Accepts `+05:30`, `-5:30`, `8`, `8.5`, `GMT+05:00`, `gmt-3:30` and the
/// like. Anything unparseable yields `0.0`.
pub fn parse_offset(text: &str) -> f64 {
    parse_offset_strict(text).unwrap_or(0.0)
}

fn parse_offset_strict(text: &str) -> Option<f64> {
    let mut rest = text.trim();

    if rest
        .get(..3)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("gmt"))
    {
        rest = rest[3..].trim_start();
    }

    let sign = match rest.chars().next() {
        Some('-') => {
            rest = &rest[1..];
            -1.0
        }
        Some('+') => {
            rest = &rest[1..];
            1.0
        }
        _ => 1.0,
    };

    if rest.is_empty() {
        return None;
    }

    let hours = match rest.split_once(':') {
        Some((hours, minutes)) => parse_component(hours)? + parse_component(minutes)? / 60.0,
        None => parse_number(rest)?,
    };

    Some(sign * hours)
}

fn parse_component(text: &str) -> Option<f64> {
    if text.is_empty() {
        Some(0.0)
    } else {
        parse_number(text)
    }
}

fn parse_number(text: &str) -> Option<f64> {
    // Signs were consumed up front and `inf`/`nan` are not offsets.
    if !text
        .chars()
        .all(|ch| ch.is_ascii_digit() || ch == '.')
    {
        return None;
    }
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Converts an hour offset into a chrono offset, rounded to whole minutes.
pub fn to_fixed_offset(value: f64) -> Option<FixedOffset> {
    let seconds = (value * 60.0).round() as i32 * 60;
    FixedOffset::east_opt(seconds)
}
