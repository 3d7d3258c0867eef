pub mod completions;
pub mod palette;
pub mod run;
pub mod slice;
pub mod validate;

use clap::{Parser, Subcommand};

/// asefactory - Aseprite batch job runner
#[derive(Parser, Debug)]
#[command(name = "asefactory")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a job spec through Aseprite
    Run(run::RunArgs),

    /// Validate job specs without running them
    Validate(validate::ValidateArgs),

    /// Slice a PNG into a deduplicated tileset without Aseprite
    Slice(slice::SliceArgs),

    /// Print the indexed palette of a PNG
    Palette(palette::PaletteArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
