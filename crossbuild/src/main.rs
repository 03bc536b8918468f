use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = crossbuild::cli::Cli::parse();
    crossbuild::app::run(&cli)
}
