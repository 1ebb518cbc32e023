use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use serde_json::json;
use timestamper::app::Editor;
use timestamper::core::validation::ValidationError;
use timestamper::models::{EditForm, MetadataRecord, PresetKind, NULL_PRESET_NAME};
use timestamper::core::presets::PresetStore;
use timestamper::settings::{JsonFileSettings, MemorySettings, SettingsStore};

fn captured() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|date| date.and_hms_opt(14, 30, 45))
        .expect("valid date")
}

fn canon_record() -> MetadataRecord {
    MetadataRecord::from_pairs([
        ("EXIF:Make", json!("Canon")),
        ("EXIF:Model", json!("EOS R5")),
        ("EXIF:LensModel", json!("RF24-70mm F2.8 L IS USM")),
        ("EXIF:LensInfo", json!("24 70 2.8 2.8")),
        ("EXIF:FocalLength", json!(35.0)),
        ("EXIF:FNumber", json!(2.8)),
        ("EXIF:ISO", json!(400)),
        ("EXIF:ExposureTime", json!(0.004)),
        ("EXIF:DateTimeOriginal", json!("2023:07:14 09:15:30")),
        ("EXIF:OffsetTimeOriginal", json!("-05:00")),
    ])
}

#[test]
fn populate_reads_tags_into_text_fields() {
    let mut form = EditForm::new(captured());
    form.populate(&canon_record());

    assert_eq!(form.make, "Canon");
    assert_eq!(form.model, "EOS R5");
    assert_eq!(form.focal_length, "35");
    assert_eq!(form.f_number, "2.8");
    assert_eq!(form.iso, "400");
    assert_eq!(form.exposure_time, "1/250");
    assert_eq!(form.wide_focal_length, "24");
    assert_eq!(form.long_focal_length, "70");
    assert_eq!(form.wide_aperture_value, "2.8");
    assert_eq!(form.long_aperture_value, "2.8");
    assert_eq!(form.offset, -5.0);
    assert_eq!(
        form.date_time_original,
        NaiveDate::from_ymd_opt(2023, 7, 14)
            .and_then(|date| date.and_hms_opt(9, 15, 30))
            .expect("valid date")
    );
}

#[test]
fn populate_falls_back_to_shutter_speed_and_offset_time() {
    let mut form = EditForm::new(captured());
    form.populate(&MetadataRecord::from_pairs([
        ("EXIF:ShutterSpeedValue", json!(2.0)),
        ("EXIF:OffsetTime", json!("+09:30")),
    ]));

    assert_eq!(form.exposure_time, "2");
    assert_eq!(form.offset, 9.5);
    assert_eq!(form.date_time_original, captured());
}

#[test]
fn populate_clamps_out_of_range_offsets() {
    let mut form = EditForm::new(captured());
    form.populate(&MetadataRecord::from_pairs([("EXIF:OffsetTimeOriginal", "+18:00")]));
    assert_eq!(form.offset, 14.0);
}

#[test]
fn to_tags_writes_the_full_mapping() {
    let mut form = EditForm::new(captured());
    form.offset = 5.5;
    form.make = String::from("Nikon");
    form.wide_aperture_value = String::from("1.8");
    form.wide_focal_length = String::from("50");
    form.focal_length = String::from("50mm");
    form.exposure_time = String::from("1/125");

    let tags = form.to_tags();

    assert_eq!(tags["DateTimeOriginal"], "2024:03:01 14:30:00");
    assert_eq!(tags["OffsetTimeOriginal"], "+05:30");
    assert_eq!(tags["OffsetTime"], "+05:30");
    assert_eq!(tags["Make"], "Nikon");
    assert_eq!(tags["MaxApertureValue"], "1.8");
    assert_eq!(tags["LensInfo"], "50 50 1.8 1.8");
    assert_eq!(tags["FocalLength"], "50");
    assert_eq!(tags["ExposureTime"], "1/125");
    assert_eq!(tags["ShutterSpeedValue"], "1/125");
    assert!(!tags.contains_key("Model"));
    assert!(!tags.contains_key("ISO"));
}

#[test]
fn to_tags_omits_empty_lens_info() {
    let form = EditForm::new(captured());
    let tags = form.to_tags();

    assert!(!tags.contains_key("LensInfo"));
    assert_eq!(tags.len(), 3);
}

#[test]
fn validate_reports_the_first_bad_field() {
    let mut form = EditForm::new(captured());
    form.iso = String::from("100");
    form.exposure_time = String::from("1/250");
    assert_eq!(form.validate(), Ok(()));

    form.f_number = String::from("f/2.8");
    form.wide_focal_length = String::from("wide");
    assert_eq!(
        form.validate(),
        Err(ValidationError::NotNumeric {
            field: String::from("FNumber"),
            value: String::from("f/2.8"),
        })
    );

    form.exposure_time = String::from("1/250s");
    assert!(matches!(
        form.validate(),
        Err(ValidationError::NotExposureTime { .. })
    ));
}

#[test]
fn prime_lens_values_fill_the_shot_fields() {
    let mut form = EditForm::new(captured());
    form.set_wide_focal_length("35");
    form.finish_wide_focal_length();
    form.set_wide_aperture_value("1.4");

    assert_eq!(form.focal_length, "35");
    assert_eq!(form.f_number, "1.4");
}

#[test]
fn zoom_lens_values_leave_the_shot_fields_alone() {
    let mut form = EditForm::new(captured());
    form.long_focal_length = String::from("70");
    form.long_aperture_value = String::from("4");
    form.set_wide_focal_length("24");
    form.finish_wide_focal_length();
    form.set_wide_aperture_value("2.8");
    form.finish_wide_aperture_value();

    assert_eq!(form.focal_length, "");
    assert_eq!(form.f_number, "");
}

#[test]
fn clearing_a_wide_value_clears_the_long_value() {
    let mut form = EditForm::new(captured());
    form.long_focal_length = String::from("70");
    form.long_aperture_value = String::from("4");

    form.set_wide_focal_length("");
    form.set_wide_aperture_value("");

    assert_eq!(form.long_focal_length, "");
    assert_eq!(form.long_aperture_value, "");
}

#[test]
fn editor_selects_matching_presets_without_loading_them() {
    let shared = Rc::new(RefCell::new(MemorySettings::new()));
    let mut editor = Editor::new(Rc::clone(&shared), EditForm::new(captured()));

    editor.form.make = String::from("Canon");
    editor.form.model = String::from("EOS R5");
    editor.add_preset(PresetKind::Camera, "R5");
    editor.form.lens_model = String::from("RF24-70mm F2.8 L IS USM");
    editor.form.wide_focal_length = String::from("24");
    editor.form.long_focal_length = String::from("70");
    editor.form.lens_serial_number = String::from("SN-0042");
    editor.add_preset(PresetKind::Lens, "Zoom");

    let mut fresh = Editor::new(shared, EditForm::new(captured()));
    fresh.populate(&canon_record());

    assert_eq!(fresh.selected_preset(PresetKind::Camera), "R5");
    assert_eq!(fresh.selected_preset(PresetKind::Lens), NULL_PRESET_NAME);
    assert_eq!(fresh.form.lens_serial_number, "");
}

#[test]
fn editor_preset_selection_fills_the_form() {
    let mut editor = Editor::new(
        Rc::new(RefCell::new(MemorySettings::new())),
        EditForm::new(captured()),
    );
    editor.form.lens_make = String::from("Sigma");
    editor.form.wide_focal_length = String::from("35");
    editor.add_preset(PresetKind::Lens, "Art");

    editor.form.clear(captured());
    assert!(editor.select_preset(PresetKind::Lens, "Art"));
    assert_eq!(editor.form.lens_make, "Sigma");
    assert_eq!(editor.form.wide_focal_length, "35");

    assert!(editor.select_preset(PresetKind::Lens, NULL_PRESET_NAME));
    assert_eq!(editor.form.lens_make, "Sigma");
    assert!(!editor.select_preset(PresetKind::Lens, "Missing"));
}

#[test]
fn editor_clear_presets_resets_selection() {
    let mut editor = Editor::new(
        Rc::new(RefCell::new(MemorySettings::new())),
        EditForm::new(captured()),
    );
    editor.form.make = String::from("Sony");
    editor.add_preset(PresetKind::Camera, "A7");
    editor.form.lens_make = String::from("Sony");
    editor.add_preset(PresetKind::Lens, "FE");

    editor.clear_presets();

    for kind in PresetKind::ALL {
        assert_eq!(editor.selected_preset(kind), NULL_PRESET_NAME);
        assert_eq!(editor.presets(kind).names(), vec![NULL_PRESET_NAME]);
    }
}

#[test]
fn editor_over_a_settings_file_keeps_both_preset_kinds() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("settings.json");
    let settings = JsonFileSettings::open(&path).expect("missing file should open");
    let mut editor = Editor::new(Rc::new(RefCell::new(settings)), EditForm::new(captured()));

    editor.form.make = String::from("Olympus");
    editor.add_preset(PresetKind::Camera, "Body");
    editor.form.lens_make = String::from("Zuiko");
    editor.add_preset(PresetKind::Lens, "Glass");

    let reopened = JsonFileSettings::open(&path).expect("written file should open");
    let cameras = PresetStore::new(reopened, PresetKind::Camera);
    assert_eq!(cameras.names(), vec![NULL_PRESET_NAME, "Body"]);
    assert_eq!(
        cameras.store().get("preset_lenses"),
        Some(json!([{
            "Name": "Glass",
            "LensMake": "Zuiko",
            "LensModel": "",
            "WideFocalLength": "",
            "LongFocalLength": "",
            "WideApertureValue": "",
            "LongApertureValue": "",
            "LensSerialNumber": "",
        }]))
    );
}

#[test]
fn editor_from_separate_stores_clears_both() {
    let mut cameras = PresetStore::new(MemorySettings::new(), PresetKind::Camera);
    let mut lenses = PresetStore::new(MemorySettings::new(), PresetKind::Lens);
    cameras.add("Body", &[(String::from("Make"), String::from("Pentax"))].into());
    lenses.add("Glass", &[(String::from("LensMake"), String::from("HD"))].into());

    let mut editor = Editor::from_stores(cameras, lenses, EditForm::new(captured()));
    editor.clear_presets();

    for kind in PresetKind::ALL {
        assert_eq!(editor.presets(kind).names(), vec![NULL_PRESET_NAME]);
        assert_eq!(editor.presets(kind).store().get(kind.storage_key()), None);
    }
}
