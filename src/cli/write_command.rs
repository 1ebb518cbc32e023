use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use chrono::NaiveDateTime;
use clap::Args;

use crate::app::{Editor, Session};
use crate::cli::{metadata_engine, GlobalArgs};
use crate::core::datetime::{parse_exif_datetime, step_for_shortcut, with_offset};
use crate::core::formats::SUPPORTED_EXTENSIONS;
use crate::core::offset::{clamp_offset, parse_offset};
use crate::models::tag::*;
use crate::models::{EditForm, OperationSummary, PresetKind};

#[derive(Args, Clone, Default, PartialEq, Debug)]
pub struct WriteArgs {
    /// Images or directories of images to update
    #[clap(required = true)]
    pub files: Vec<PathBuf>,

    /// Start from the first file's existing tags
    #[clap(long)]
    pub amend: bool,

    /// Apply a saved camera preset before the field flags
    #[clap(long)]
    pub camera_preset: Option<String>,

    /// Apply a saved lens preset before the field flags
    #[clap(long)]
    pub lens_preset: Option<String>,

    #[clap(long)]
    pub make: Option<String>,

    #[clap(long)]
    pub model: Option<String>,

    #[clap(long)]
    pub lens_make: Option<String>,

    #[clap(long)]
    pub lens_model: Option<String>,

    #[clap(long)]
    pub lens_serial: Option<String>,

    /// Wide (or only) focal length in mm
    #[clap(long)]
    pub wide_focal: Option<String>,

    #[clap(long)]
    pub long_focal: Option<String>,

    /// Widest aperture at the wide end
    #[clap(long)]
    pub wide_aperture: Option<String>,

    #[clap(long)]
    pub long_aperture: Option<String>,

    #[clap(long)]
    pub focal_length: Option<String>,

    #[clap(long)]
    pub f_number: Option<String>,

    #[clap(long)]
    pub iso: Option<String>,

    /// Exposure time, e.g. 1/250 or 0.5
    #[clap(long)]
    pub exposure: Option<String>,

    /// Capture time as `YYYY:MM:DD HH:MM:SS` or `YYYY-MM-DDTHH:MM:SS`
    #[clap(long, value_parser = parse_datetime_arg)]
    pub datetime: Option<NaiveDateTime>,

    /// Nudge the capture time by step keys, applied after --datetime:
    /// Y/H ±1 day, U/J ±1 hour, I/K ±10 min, O/L ±1 min (e.g. `YJJ`)
    #[clap(long, value_parser = parse_shift_arg, value_name = "KEYS")]
    pub shift: Option<String>,

    /// Timezone offset, e.g. +05:30, -8 or GMT+1
    #[clap(long, allow_hyphen_values = true)]
    pub offset: Option<String>,
}

impl WriteArgs {
    pub fn invoke(self, global: &GlobalArgs) -> anyhow::Result<()> {
        let settings = global.open_settings()?;
        let engine = metadata_engine(&settings);

        let mut session = Session::new();
        if session.load_files(&self.files) == 0 {
            bail!(
                "no supported images among the given paths (expected {})",
                SUPPORTED_EXTENSIONS.join(", ")
            );
        }

        let mut editor = Editor::new(settings, EditForm::default());
        if self.amend {
            if let Some(photo) = session.current_photo() {
                let record = engine
                    .read(&photo.path)
                    .with_context(|| format!("failed to read {}", photo.path.display()))?;
                editor.populate(&record);
            }
        }

        for (kind, name) in [
            (PresetKind::Camera, &self.camera_preset),
            (PresetKind::Lens, &self.lens_preset),
        ] {
            if let Some(name) = name {
                if !editor.select_preset(kind, name) {
                    return Err(anyhow!("no {} preset named '{name}'", kind.label()));
                }
            }
        }

        self.apply_to(&mut editor.form);
        if let Some(zoned) = with_offset(editor.form.date_time_original, editor.form.offset) {
            println!("capture time {}", zoned.format("%Y-%m-%d %H:%M %:z"));
        }

        let rows: Vec<usize> = (0..session.photos.len()).collect();
        let results = session.save_rows(&engine, &editor.form, &rows)?;
        for result in &results {
            match &result.error {
                None => println!("saved   {}", result.path.display()),
                Some(err) => println!("failed  {}: {err}", result.path.display()),
            }
        }

        let summary = OperationSummary::from_results(&results);
        println!("{} of {} files saved", summary.succeeded, summary.total);
        if summary.failed > 0 {
            bail!("{} files could not be saved", summary.failed);
        }
        Ok(())
    }

    /// Applies the flags that were given, in the order a user would type them
    /// into the form so the prefill rules run.
    pub fn apply_to(&self, form: &mut EditForm) {
        let plain = [
            (MAKE, &self.make),
            (MODEL, &self.model),
            (LENS_MAKE, &self.lens_make),
            (LENS_MODEL, &self.lens_model),
            (LENS_SERIAL_NUMBER, &self.lens_serial),
            (FOCAL_LENGTH, &self.focal_length),
            (F_NUMBER, &self.f_number),
            (ISO, &self.iso),
            (EXPOSURE_TIME, &self.exposure),
            (LONG_FOCAL_LENGTH, &self.long_focal),
            (LONG_APERTURE_VALUE, &self.long_aperture),
        ];
        for (name, value) in plain {
            if let Some(value) = value {
                form.set_field(name, value.as_str());
            }
        }

        if let Some(wide_focal) = &self.wide_focal {
            form.set_wide_focal_length(wide_focal.as_str());
            form.finish_wide_focal_length();
        }
        if let Some(wide_aperture) = &self.wide_aperture {
            form.set_wide_aperture_value(wide_aperture.as_str());
            form.finish_wide_aperture_value();
        }

        if let Some(captured) = self.datetime {
            form.date_time_original = captured;
        }
        for key in self.shift.iter().flat_map(|keys| keys.chars()) {
            if let Some(step) = step_for_shortcut(key) {
                form.date_time_original = step.apply(form.date_time_original);
            }
        }
        if let Some(offset) = &self.offset {
            form.offset = clamp_offset(parse_offset(offset));
        }
    }
}

fn parse_datetime_arg(text: &str) -> Result<NaiveDateTime, String> {
    parse_exif_datetime(text)
        .or_else(|| NaiveDateTime::parse_from_str(text.trim(), "%Y-%m-%dT%H:%M:%S").ok())
        .or_else(|| NaiveDateTime::parse_from_str(text.trim(), "%Y-%m-%dT%H:%M").ok())
        .ok_or_else(|| format!("unrecognised date/time '{text}'"))
}

fn parse_shift_arg(text: &str) -> Result<String, String> {
    match text.chars().find(|&key| step_for_shortcut(key).is_none()) {
        Some(key) => Err(format!("'{key}' is not a step key (use Y H U J I K O L)")),
        None => Ok(text.to_string()),
    }
}
