use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{json, Value};
use timestamper::core::presets::PresetStore;
use timestamper::models::{FieldValues, MetadataRecord, PresetKind, NULL_PRESET_NAME};
use timestamper::settings::{MemorySettings, SettingsStore};

/// Records every value handed to `set` so tests can inspect what was written.
#[derive(Debug, Default)]
struct RecordingSettings {
    inner: MemorySettings,
    writes: Vec<(String, Value)>,
}

impl SettingsStore for RecordingSettings {
    fn get(&self, key: &str) -> Option<Value> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.writes.push((key.to_string(), value.clone()));
        self.inner.set(key, value);
    }

    fn remove(&mut self, key: &str) {
        self.inner.remove(key);
    }
}

fn values(pairs: &[(&str, &str)]) -> FieldValues {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

#[test]
fn add_load_and_remove_camera_preset() {
    let mut presets = PresetStore::new(MemorySettings::new(), PresetKind::Camera);

    presets.add("My Nikon", &values(&[("Make", "Nikon"), ("Model", "D850")]));
    assert_eq!(
        presets.store().get("preset_cameras"),
        Some(json!([{"Name": "My Nikon", "Make": "Nikon", "Model": "D850"}]))
    );

    let loaded = presets.load("My Nikon").expect("preset should load");
    assert_eq!(loaded, values(&[("Make", "Nikon"), ("Model", "D850")]));

    presets.remove("My Nikon");
    assert!(presets.load("My Nikon").is_none());
    assert_eq!(presets.store().get("preset_cameras"), Some(json!([])));
}

#[test]
fn lens_preset_round_trips_every_field() {
    let mut presets = PresetStore::new(MemorySettings::new(), PresetKind::Lens);
    let sigma = values(&[
        ("LensMake", "Sigma"),
        ("LensModel", "35mm Art"),
        ("WideFocalLength", "35"),
        ("LongFocalLength", "35"),
        ("WideApertureValue", "1.4"),
        ("LongApertureValue", "1.4"),
        ("LensSerialNumber", "SN12345"),
    ]);

    presets.add("My Sigma 35mm", &sigma);

    assert_eq!(presets.load("My Sigma 35mm"), Some(sigma));
    assert!(presets.names().contains(&"My Sigma 35mm"));
}

#[test]
fn load_fills_fields_missing_from_old_presets() {
    let mut settings = MemorySettings::new();
    settings.set("preset_lenses", json!([{"Name": "Old", "LensModel": "50mm"}]));
    let presets = PresetStore::new(settings, PresetKind::Lens);

    let loaded = presets.load("Old").expect("preset should load");
    assert_eq!(loaded.len(), PresetKind::Lens.fields().len());
    assert_eq!(loaded["LensModel"], "50mm");
    assert_eq!(loaded["LensSerialNumber"], "");
}

#[test]
fn names_are_case_sensitive() {
    let mut presets = PresetStore::new(MemorySettings::new(), PresetKind::Camera);
    presets.add("nikon", &values(&[("Make", "Nikon")]));
    presets.add("Nikon", &values(&[("Make", "NIKON CORPORATION")]));

    assert_eq!(presets.names(), vec![NULL_PRESET_NAME, "Nikon", "nikon"]);
    assert!(presets.load("NIKON").is_none());
}

#[test]
fn removing_placeholder_or_unknown_name_is_ignored() {
    let mut presets = PresetStore::new(RecordingSettings::default(), PresetKind::Camera);
    presets.add("A", &values(&[("Make", "Canon")]));
    let writes_before = presets.store().writes.len();

    presets.remove(NULL_PRESET_NAME);
    presets.remove("missing");
    presets.remove("");

    assert_eq!(presets.store().writes.len(), writes_before);
    assert_eq!(presets.names(), vec![NULL_PRESET_NAME, "A"]);
}

#[test]
fn placeholder_is_never_written() {
    let mut presets = PresetStore::new(RecordingSettings::default(), PresetKind::Camera);
    presets.add("Zeta", &values(&[("Make", "Sony")]));
    presets.add(NULL_PRESET_NAME, &values(&[("Make", "Ghost")]));
    presets.add("Alpha", &values(&[("Make", "Canon")]));
    presets.remove("Zeta");

    let writes = &presets.store().writes;
    assert!(!writes.is_empty());
    for (key, value) in writes {
        assert_eq!(key, "preset_cameras");
        let names: Vec<&str> = value
            .as_array()
            .expect("presets are stored as a list")
            .iter()
            .filter_map(|entry| entry["Name"].as_str())
            .collect();
        assert!(!names.contains(&NULL_PRESET_NAME), "wrote {names:?}");
    }
    assert_eq!(presets.names(), vec![NULL_PRESET_NAME, "Alpha"]);
}

#[test]
fn matching_requires_every_set_field() {
    let mut settings = MemorySettings::new();
    settings.set("preset_cameras", json!([{"Name": "A", "Make": "Canon"}]));
    let presets = PresetStore::new(settings, PresetKind::Camera);

    let canon = MetadataRecord::from_pairs([("EXIF:Make", "Canon")]);
    let nikon = MetadataRecord::from_pairs([("EXIF:Make", "Nikon")]);

    assert_eq!(presets.find_matching_preset(&canon).as_deref(), Some("A"));
    assert_eq!(presets.find_matching_preset(&nikon), None);
    assert_eq!(presets.find_matching_preset(&MetadataRecord::new()), None);
}

#[test]
fn empty_preset_fields_do_not_block_a_match() {
    let mut presets = PresetStore::new(MemorySettings::new(), PresetKind::Camera);
    presets.add("Any Canon", &values(&[("Make", "Canon"), ("Model", "")]));

    let record = MetadataRecord::from_pairs([("EXIF:Make", "Canon"), ("EXIF:Model", "EOS R5")]);
    assert_eq!(
        presets.find_matching_preset(&record).as_deref(),
        Some("Any Canon")
    );
}

#[test]
fn first_match_in_name_order_wins() {
    let mut presets = PresetStore::new(MemorySettings::new(), PresetKind::Camera);
    presets.add("B exact", &values(&[("Make", "Canon"), ("Model", "EOS R5")]));
    presets.add("A loose", &values(&[("Make", "Canon")]));

    let record = MetadataRecord::from_pairs([("EXIF:Make", "Canon"), ("EXIF:Model", "EOS R5")]);
    assert_eq!(
        presets.find_matching_preset(&record).as_deref(),
        Some("A loose")
    );
}

#[test]
fn numeric_metadata_matches_preset_text() {
    let mut presets = PresetStore::new(MemorySettings::new(), PresetKind::Lens);
    presets.add(
        "Kit zoom",
        &values(&[("WideFocalLength", "18"), ("LongFocalLength", "55")]),
    );

    let record = MetadataRecord::from_pairs([
        ("EXIF:WideFocalLength", json!(18)),
        ("EXIF:LongFocalLength", json!(55)),
    ]);
    assert_eq!(
        presets.find_matching_preset(&record).as_deref(),
        Some("Kit zoom")
    );
}

#[test]
fn lens_presets_match_through_lens_info() {
    let mut presets = PresetStore::new(MemorySettings::new(), PresetKind::Lens);
    presets.add(
        "24-70",
        &values(&[
            ("LensModel", "RF24-70mm F2.8 L IS USM"),
            ("WideFocalLength", "24"),
            ("LongFocalLength", "70"),
        ]),
    );

    let record = MetadataRecord::from_pairs([
        ("EXIF:LensModel", "RF24-70mm F2.8 L IS USM"),
        ("EXIF:LensInfo", "24 70 2.8 2.8"),
    ]);
    assert_eq!(presets.find_matching_preset(&record), None);
    assert_eq!(
        presets
            .find_matching_preset(&record.with_lens_fields())
            .as_deref(),
        Some("24-70")
    );
}

#[test]
fn camera_and_lens_stores_share_one_backing_store() {
    let shared = Rc::new(RefCell::new(MemorySettings::new()));
    let mut cameras = PresetStore::new(Rc::clone(&shared), PresetKind::Camera);
    let mut lenses = PresetStore::new(Rc::clone(&shared), PresetKind::Lens);

    cameras.add("Body", &values(&[("Make", "Fujifilm")]));
    lenses.add("Glass", &values(&[("LensMake", "Fujifilm")]));

    let backing = shared.borrow();
    assert!(backing.get("preset_cameras").is_some());
    assert!(backing.get("preset_lenses").is_some());
}
