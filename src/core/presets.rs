use serde_json::Value;
use tracing::{info, warn};

use crate::models::tag::exif_key;
use crate::models::{FieldValues, MetadataRecord, Preset, PresetKind, NULL_PRESET_NAME};
use crate::settings::SettingsStore;

/// Named camera or lens presets backed by a [`SettingsStore`].
///
/// The in-memory list always starts with the `(None)` placeholder and is
/// reloaded from the store after every change.
#[derive(Debug)]
pub struct PresetStore<S> {
    store: S,
    kind: PresetKind,
    presets: Vec<Preset>,
}

impl<S: SettingsStore> PresetStore<S> {
    pub fn new(store: S, kind: PresetKind) -> Self {
        let mut presets = Self {
            store,
            kind,
            presets: Vec::new(),
        };
        presets.refresh();
        presets
    }

    pub fn kind(&self) -> PresetKind {
        self.kind
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    /// Preset names in display order, placeholder first.
    pub fn names(&self) -> Vec<&str> {
        self.presets.iter().map(|preset| preset.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|preset| preset.name == name)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn refresh(&mut self) {
        let mut presets = vec![Preset::none()];
        presets.extend(read_stored(&self.store, self.kind));
        self.presets = presets;
    }

    /// Saves `values` under `name`, replacing any preset with the same name.
    pub fn add(&mut self, name: &str, values: &FieldValues) {
        if name.is_empty() {
            return;
        }

        let fields = self
            .kind
            .fields()
            .iter()
            .map(|field| {
                let value = values.get(*field).cloned().unwrap_or_default();
                (field.to_string(), value)
            })
            .collect();

        self.presets.retain(|preset| preset.name != name);
        self.presets.push(Preset::new(name, fields));
        self.presets.sort_by(|a, b| a.name.cmp(&b.name));
        self.persist();
        self.refresh();

        info!("Preset '{name}' for {} has been added.", self.kind.label());
    }

    /// Deletes the named preset. The placeholder and unknown names are ignored.
    pub fn remove(&mut self, name: &str) {
        if name.is_empty() || name == NULL_PRESET_NAME {
            return;
        }
        if self.get(name).is_none() {
            return;
        }

        self.presets.retain(|preset| preset.name != name);
        self.persist();
        self.refresh();

        info!("Preset '{name}' for {} has been removed.", self.kind.label());
    }

    /// Every field of this kind with the preset's value, or `""` when the
    /// preset predates the field.
    pub fn load(&self, name: &str) -> Option<FieldValues> {
        let preset = self.get(name)?;
        Some(
            self.kind
                .fields()
                .iter()
                .map(|field| {
                    let value = preset.fields.get(*field).cloned().unwrap_or_default();
                    (field.to_string(), value)
                })
                .collect(),
        )
    }

    /// First preset whose non-empty fields all equal the record's `EXIF:`
    /// values. Empty preset fields match anything; a missing record value
    /// never matches a set preset field.
    pub fn find_matching_preset(&self, record: &MetadataRecord) -> Option<String> {
        self.presets
            .iter()
            .filter(|preset| !preset.is_none())
            .find(|preset| preset_matches(preset, self.kind, record))
            .map(|preset| preset.name.clone())
    }

    fn persist(&mut self) {
        let stored: Vec<&Preset> = self
            .presets
            .iter()
            .filter(|preset| !preset.is_none())
            .collect();

        match serde_json::to_value(stored) {
            Ok(value) => self.store.set(self.kind.storage_key(), value),
            Err(err) => warn!("failed to encode {} presets: {err}", self.kind.label()),
        }
    }
}

fn preset_matches(preset: &Preset, kind: PresetKind, record: &MetadataRecord) -> bool {
    kind.fields().iter().all(|field| {
        let expected = preset.fields.get(*field).map(String::as_str).unwrap_or("");
        if expected.is_empty() {
            return true;
        }
        match record.text(&exif_key(field)) {
            Some(actual) if !actual.is_empty() => actual == expected,
            _ => false,
        }
    })
}

fn read_stored<S: SettingsStore>(store: &S, kind: PresetKind) -> Vec<Preset> {
    let Some(value) = store.get(kind.storage_key()) else {
        return Vec::new();
    };
    let Value::Array(entries) = value else {
        warn!("stored {} presets are not a list, ignoring them", kind.label());
        return Vec::new();
    };

    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Preset>(entry) {
            Ok(preset) if preset.is_none() => None,
            Ok(preset) => Some(preset),
            Err(err) => {
                warn!("skipping unreadable {} preset: {err}", kind.label());
                None
            }
        })
        .collect()
}

/// Drops every saved camera and lens preset.
pub fn clear_all_presets<S: SettingsStore>(store: &mut S) {
    for kind in PresetKind::ALL {
        store.remove(kind.storage_key());
    }
    info!("Cleared presets");
}
