use asefactory::cli::{Cli, Commands};
use asefactory::output::Printer;
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Run(args) => asefactory::cli::run::run(args, &printer)?,
        Commands::Validate(args) => asefactory::cli::validate::run(args, &printer)?,
        Commands::Slice(args) => {
            asefactory::cli::slice::run(args, &printer)?;
        }
        Commands::Palette(args) => asefactory::cli::palette::run(args, &printer)?,
        Commands::Completions(args) => asefactory::cli::completions::run(args)?,
    }

    Ok(())
}
