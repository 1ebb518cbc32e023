use std::path::PathBuf;

use anyhow::{anyhow, bail};
use clap::{Args, Subcommand};

use crate::cli::{metadata_engine, GlobalArgs, KindArg};
use crate::core::presets::{clear_all_presets, PresetStore};
use crate::models::{FieldValues, PresetKind};

#[derive(Args, Clone, PartialEq, Debug)]
pub struct PresetArgs {
    /// Which preset list to work on
    #[clap(long, value_enum, default_value_t, global = true)]
    pub kind: KindArg,

    #[clap(subcommand)]
    pub command: PresetCommand,
}

#[derive(Subcommand, Clone, PartialEq, Debug)]
pub enum PresetCommand {
    /// List preset names
    List,

    /// Print a preset's fields
    Show { name: String },

    /// Save a preset from Field=Value pairs, replacing one with the same name
    Add {
        name: String,
        #[clap(value_parser = parse_field_value, value_name = "FIELD=VALUE")]
        fields: Vec<(String, String)>,
    },

    /// Delete a preset
    Remove { name: String },

    /// Delete every camera and lens preset
    Clear,

    /// Print the camera and lens presets matching a file
    Match { file: PathBuf },
}

impl PresetArgs {
    pub fn invoke(self, global: &GlobalArgs) -> anyhow::Result<()> {
        let settings = global.open_settings()?;
        let kind = PresetKind::from(self.kind);

        match self.command {
            PresetCommand::List => {
                let presets = PresetStore::new(settings, kind);
                for name in presets.names() {
                    println!("{name}");
                }
            }
            PresetCommand::Show { name } => {
                let presets = PresetStore::new(settings, kind);
                let values = presets
                    .load(&name)
                    .ok_or_else(|| anyhow!("no {} preset named '{name}'", kind.label()))?;
                for (field, value) in values {
                    println!("{field}: {value}");
                }
            }
            PresetCommand::Add { name, fields } => {
                let values = field_values(kind, fields)?;
                let mut presets = PresetStore::new(settings, kind);
                presets.add(&name, &values);
                println!("Preset '{name}' for {} has been added.", kind.label());
            }
            PresetCommand::Remove { name } => {
                let mut presets = PresetStore::new(settings, kind);
                if presets.get(&name).map_or(true, |preset| preset.is_none()) {
                    println!("No {} preset named '{name}', nothing removed.", kind.label());
                    return Ok(());
                }
                presets.remove(&name);
                println!("Preset '{name}' for {} has been removed.", kind.label());
            }
            PresetCommand::Clear => {
                let mut settings = settings;
                clear_all_presets(&mut settings);
                println!("Cleared presets");
            }
            PresetCommand::Match { file } => {
                let record = metadata_engine(&settings).read(&file)?.with_lens_fields();
                for kind in PresetKind::ALL {
                    let presets = PresetStore::new(settings.clone(), kind);
                    match presets.find_matching_preset(&record) {
                        Some(name) => println!("{}: {name}", kind.label()),
                        None => println!("{}: no match", kind.label()),
                    }
                }
            }
        }
        Ok(())
    }
}

fn parse_field_value(text: &str) -> Result<(String, String), String> {
    let (field, value) = text
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{text}'"))?;
    Ok((field.trim().to_string(), value.to_string()))
}

fn field_values(kind: PresetKind, pairs: Vec<(String, String)>) -> anyhow::Result<FieldValues> {
    let known = kind.fields();
    for (field, _) in &pairs {
        if !known.contains(&field.as_str()) {
            bail!(
                "'{field}' is not a {} preset field (expected one of: {})",
                kind.label(),
                known.join(", ")
            );
        }
    }
    Ok(pairs.into_iter().collect())
}
