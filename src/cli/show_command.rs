use std::path::PathBuf;

use clap::Args;

use crate::cli::{metadata_engine, GlobalArgs};
use crate::core::display::group_tags;

#[derive(Args, Clone, PartialEq, Debug)]
pub struct ShowArgs {
    /// Image to inspect
    pub file: PathBuf,
}

impl ShowArgs {
    pub fn invoke(self, global: &GlobalArgs) -> anyhow::Result<()> {
        let settings = global.open_settings()?;
        let record = metadata_engine(&settings).read(&self.file)?;

        for group in group_tags(&record) {
            println!("{}", group.name);
            for tag in group.tags {
                println!(
                    "  {}: {}  [{}]",
                    tag.display_name,
                    tag.value,
                    tag.category.as_str()
                );
            }
        }
        Ok(())
    }
}
