use timestamper::core::lens_info::{decode_lens_info, encode_lens_info};
use timestamper::core::shutter::{format_shutter_speed, format_shutter_speed_with_unit};

#[test]
fn shutter_speeds_below_a_second_are_fractions() {
    assert_eq!(format_shutter_speed(0.5), "1/2");
    assert_eq!(format_shutter_speed(1.0 / 60.0), "1/60");
    assert_eq!(format_shutter_speed(0.004), "1/250");
    assert_eq!(format_shutter_speed(0.001), "1/1000");
    assert_eq!(format_shutter_speed(0.3), "1/3.33333");
}

#[test]
fn long_exposures_are_plain_seconds() {
    assert_eq!(format_shutter_speed(1.0), "1");
    assert_eq!(format_shutter_speed(2.0), "2");
    assert_eq!(format_shutter_speed(2.5), "2.5");
    assert_eq!(format_shutter_speed(30.0), "30");
}

#[test]
fn tag_view_variant_appends_seconds() {
    assert_eq!(format_shutter_speed_with_unit(0.5), "1/2s");
    assert_eq!(format_shutter_speed_with_unit(1.0 / 60.0), "1/60s");
    assert_eq!(format_shutter_speed_with_unit(1.0), "1s");
    assert_eq!(format_shutter_speed_with_unit(2.0), "2s");
    assert_eq!(format_shutter_speed_with_unit(0.001), "1/1000s");
}

#[test]
fn lens_info_decodes_four_numbers() {
    assert_eq!(
        decode_lens_info("18 55 3.5 5.6"),
        Some([
            String::from("18"),
            String::from("55"),
            String::from("3.5"),
            String::from("5.6"),
        ])
    );
}

#[test]
fn lens_info_rejects_the_whole_value() {
    assert_eq!(decode_lens_info("not enough fields"), None);
    assert_eq!(decode_lens_info("18 55 3.5 notanumber"), None);
    assert_eq!(decode_lens_info("18 55 3.5"), None);
    assert_eq!(decode_lens_info(""), None);
}

#[test]
fn lens_info_long_values_default_to_wide() {
    assert_eq!(encode_lens_info("50", "", "1.8", ""), "50 50 1.8 1.8");
    assert_eq!(encode_lens_info("24", "70", "2.8", "4.0"), "24 70 2.8 4.0");
}

#[test]
fn encoded_lens_info_decodes_again() {
    let encoded = encode_lens_info("35", "", "1.4", "");
    let decoded = decode_lens_info(&encoded).expect("encoded value should decode");
    assert_eq!(decoded, ["35", "35", "1.4", "1.4"].map(String::from));
}
