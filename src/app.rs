use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::mpsc;

use thiserror::Error;
use tracing::info;

use crate::core::bulk::BulkWriter;
use crate::core::formats::collect_images;
use crate::core::metadata::{MetadataEngine, MetadataError};
use crate::core::presets::{clear_all_presets, PresetStore};
use crate::core::validation::ValidationError;
use crate::models::{
    EditForm, MetadataRecord, OperationResult, PhotoEntry, PresetKind, NULL_PRESET_NAME,
};
use crate::settings::SettingsStore;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid file row: {0}")]
    InvalidRow(usize),

    #[error("No files selected.")]
    NoSelection,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

/// The list of files being worked through and which of them are saved.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub photos: Vec<PhotoEntry>,
    pub current: Option<usize>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the list with the supported images under `paths` and selects
    /// the first one. An empty result leaves the current list alone.
    pub fn load_files<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let images = collect_images(paths);
        if images.is_empty() {
            return 0;
        }

        self.photos = images.into_iter().map(PhotoEntry::from_path).collect();
        self.current = Some(0);
        info!("Loaded {} files", self.photos.len());
        self.photos.len()
    }

    pub fn current_photo(&self) -> Option<&PhotoEntry> {
        self.current.and_then(|row| self.photos.get(row))
    }

    pub fn select(&mut self, row: usize) -> Result<&PhotoEntry, AppError> {
        let photo = self.photos.get(row).ok_or(AppError::InvalidRow(row))?;
        self.current = Some(row);
        Ok(photo)
    }

    pub fn done_count(&self) -> usize {
        self.photos.iter().filter(|photo| photo.done).count()
    }

    pub fn is_finished(&self) -> bool {
        !self.photos.is_empty() && self.done_count() == self.photos.len()
    }

    /// Marks rows as saved and moves the selection to the next unsaved file
    /// after the last saved row, wrapping around.
    pub fn mark_saved(&mut self, rows: &[usize]) -> Option<usize> {
        let mut last_saved = None;
        for &row in rows {
            if let Some(photo) = self.photos.get_mut(row) {
                photo.done = true;
                last_saved = last_saved.max(Some(row));
            }
        }

        let total = self.photos.len();
        if self.done_count() < total {
            let start = last_saved.or(self.current).unwrap_or(0);
            if let Some(next) = (1..total)
                .map(|step| (start + step) % total)
                .find(|&row| !self.photos[row].done)
            {
                info!("Advancing to {}", self.photos[next].filename);
                self.current = Some(next);
            }
        }

        self.current
    }

    /// Validates the form, writes its tags to `rows` and advances past the
    /// files that saved.
    pub fn save_rows(
        &mut self,
        engine: &MetadataEngine,
        form: &EditForm,
        rows: &[usize],
    ) -> Result<Vec<OperationResult>, AppError> {
        if rows.is_empty() {
            return Err(AppError::NoSelection);
        }
        let paths = rows
            .iter()
            .map(|&row| {
                self.photos
                    .get(row)
                    .map(|photo| photo.path.clone())
                    .ok_or(AppError::InvalidRow(row))
            })
            .collect::<Result<Vec<PathBuf>, AppError>>()?;

        form.validate()?;
        let tags = form.to_tags();

        // Progress is only interesting to interactive callers.
        let (progress_tx, _progress_rx) = mpsc::channel();
        let results = BulkWriter::write_all(engine, &paths, &tags, progress_tx);

        let saved: Vec<usize> = rows
            .iter()
            .zip(&results)
            .filter(|(_, result)| result.success)
            .map(|(&row, _)| row)
            .collect();
        if !saved.is_empty() {
            self.mark_saved(&saved);
        }

        Ok(results)
    }
}

/// The edit form together with the camera and lens presets that feed it.
#[derive(Debug)]
pub struct Editor<S> {
    pub form: EditForm,
    cameras: PresetStore<S>,
    lenses: PresetStore<S>,
    selected_camera: String,
    selected_lens: String,
}

impl<T: SettingsStore> Editor<Rc<RefCell<T>>> {
    /// Both preset lists write through the one shared store, so saving one
    /// kind never overwrites the other with a stale copy.
    pub fn new(store: Rc<RefCell<T>>, form: EditForm) -> Self {
        Self::from_stores(
            PresetStore::new(Rc::clone(&store), PresetKind::Camera),
            PresetStore::new(store, PresetKind::Lens),
            form,
        )
    }
}

impl<S: SettingsStore> Editor<S> {
    pub fn from_stores(cameras: PresetStore<S>, lenses: PresetStore<S>, form: EditForm) -> Self {
        Self {
            form,
            cameras,
            lenses,
            selected_camera: String::from(NULL_PRESET_NAME),
            selected_lens: String::from(NULL_PRESET_NAME),
        }
    }

    pub fn presets(&self, kind: PresetKind) -> &PresetStore<S> {
        match kind {
            PresetKind::Camera => &self.cameras,
            PresetKind::Lens => &self.lenses,
        }
    }

    fn presets_mut(&mut self, kind: PresetKind) -> &mut PresetStore<S> {
        match kind {
            PresetKind::Camera => &mut self.cameras,
            PresetKind::Lens => &mut self.lenses,
        }
    }

    pub fn selected_preset(&self, kind: PresetKind) -> &str {
        match kind {
            PresetKind::Camera => &self.selected_camera,
            PresetKind::Lens => &self.selected_lens,
        }
    }

    fn set_selected(&mut self, kind: PresetKind, name: &str) {
        let slot = match kind {
            PresetKind::Camera => &mut self.selected_camera,
            PresetKind::Lens => &mut self.selected_lens,
        };
        *slot = name.to_string();
    }

    /// Fills the form from a file and selects the presets that describe it.
    pub fn populate(&mut self, record: &MetadataRecord) {
        self.form.populate(record);

        let matchable = record.with_lens_fields();
        for kind in PresetKind::ALL {
            let matched = self.presets(kind).find_matching_preset(&matchable);
            self.set_selected(kind, matched.as_deref().unwrap_or(NULL_PRESET_NAME));
        }
    }

    /// Selects a preset and copies its values into the form. Selecting the
    /// placeholder leaves the form untouched.
    pub fn select_preset(&mut self, kind: PresetKind, name: &str) -> bool {
        if name == NULL_PRESET_NAME {
            self.set_selected(kind, name);
            return true;
        }
        let Some(values) = self.presets(kind).load(name) else {
            return false;
        };
        self.form.apply_preset_fields(&values);
        self.set_selected(kind, name);
        true
    }

    /// Saves the form's current values as a preset and selects it.
    pub fn add_preset(&mut self, kind: PresetKind, name: &str) {
        if name.is_empty() || name == NULL_PRESET_NAME {
            return;
        }
        let values = self.form.preset_fields(kind);
        self.presets_mut(kind).add(name, &values);
        self.set_selected(kind, name);
    }

    pub fn remove_preset(&mut self, kind: PresetKind, name: &str) {
        self.presets_mut(kind).remove(name);
        if self.selected_preset(kind) == name {
            self.set_selected(kind, NULL_PRESET_NAME);
        }
    }

    /// Drops every saved camera and lens preset.
    pub fn clear_presets(&mut self) {
        for kind in PresetKind::ALL {
            let presets = self.presets_mut(kind);
            clear_all_presets(presets.store_mut());
            presets.refresh();
            self.set_selected(kind, NULL_PRESET_NAME);
        }
    }
}
