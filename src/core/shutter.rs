//! Exposure-time display.
//!
//! Callers must never pass `0.0`: the fraction branch divides by the value.

const SIGNIFICANT_DIGITS: i32 = 6;

/// Formats an exposure time for the edit form, e.g. `1/250` or `2`.
pub fn format_shutter_speed(value: f64) -> String {
    if value < 1.0 {
        format!("1/{}", format_general(1.0 / value))
    } else {
        format_general(value)
    }
}

/// Same as [`format_shutter_speed`] with a trailing `s`, used by the tag view.
pub fn format_shutter_speed_with_unit(value: f64) -> String {
    format!("{}s", format_shutter_speed(value))
}

/// Reads `0.004`, `1/250` or `1/250s` back into seconds.
pub fn parse_shutter_speed(text: &str) -> Option<f64> {
    let text = text.trim();
    let text = text.strip_suffix('s').unwrap_or(text).trim_end();

    match text.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator = numerator.trim().parse::<f64>().ok()?;
            let denominator = denominator.trim().parse::<f64>().ok()?;
            if denominator == 0.0 {
                return None;
            }
            Some(numerator / denominator)
        }
        None => text.parse::<f64>().ok(),
    }
}

/// Shortest general notation with six significant digits, matching C's `%g`.
pub fn format_general(value: f64) -> String {
    if value == 0.0 {
        return String::from("0");
    }
    if value.is_nan() {
        return String::from("nan");
    }
    if value.is_infinite() {
        return String::from(if value > 0.0 { "inf" } else { "-inf" });
    }

    let scientific = format!("{:.*e}", (SIGNIFICANT_DIGITS - 1) as usize, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            strip_trailing_zeros(mantissa),
            exponent.abs()
        )
    } else {
        let decimals = (SIGNIFICANT_DIGITS - 1 - exponent) as usize;
        strip_trailing_zeros(&format!("{value:.decimals$}")).to_string()
    }
}

fn strip_trailing_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
