use clap::{Args, Subcommand};

use crate::core::offset::{format_offset, parse_offset};

#[derive(Args, Clone, PartialEq, Debug)]
pub struct OffsetArgs {
    #[clap(subcommand)]
    pub command: OffsetCommand,
}

#[derive(Subcommand, Clone, PartialEq, Debug)]
pub enum OffsetCommand {
    /// Hours to ±HH:MM, e.g. 5.5 -> +05:30
    Format {
        #[clap(allow_hyphen_values = true)]
        hours: f64,
    },

    /// Offset text to hours; unreadable text gives 0
    Parse {
        #[clap(allow_hyphen_values = true)]
        text: String,
    },
}

impl OffsetArgs {
    pub fn invoke(self) -> anyhow::Result<()> {
        match self.command {
            OffsetCommand::Format { hours } => println!("{}", format_offset(hours)),
            OffsetCommand::Parse { text } => println!("{}", parse_offset(&text)),
        }
        Ok(())
    }
}
