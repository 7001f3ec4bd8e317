use anyhow::Result;
use clap::Parser;

mod cli;
mod convert;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    convert::run_convert(cli)
}
