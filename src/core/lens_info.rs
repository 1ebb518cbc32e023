/// Splits a `LensInfo` value into wide/long focal length and wide/long aperture.
///
/// The whole value is rejected when it does not hold exactly four numeric
/// tokens.
pub fn decode_lens_info(text: &str) -> Option<[String; 4]> {
    let fields: [&str; 4] = text.splitn(4, ' ').collect::<Vec<_>>().try_into().ok()?;
    if !fields.iter().all(|token| is_float(token)) {
        return None;
    }

    Some(fields.map(String::from))
}

/// Joins the four lens-info fields. A missing long value takes the wide value.
///
/// Empty fields stay as empty tokens, so all-empty input yields three spaces.
pub fn encode_lens_info(
    wide_focal: &str,
    long_focal: &str,
    wide_aperture: &str,
    long_aperture: &str,
) -> String {
    let long_focal = default_to_wide(wide_focal, long_focal);
    let long_aperture = default_to_wide(wide_aperture, long_aperture);
    format!("{wide_focal} {long_focal} {wide_aperture} {long_aperture}")
}

fn default_to_wide<'a>(wide: &'a str, long: &'a str) -> &'a str {
    if long.is_empty() && !wide.is_empty() {
        wide
    } else {
        long
    }
}

fn is_float(token: &str) -> bool {
    let token = token.trim();
    !token.is_empty() && token.parse::<f64>().is_ok()
}
