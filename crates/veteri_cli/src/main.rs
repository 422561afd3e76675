//! `veteri` binary: interactive record keeping for a veterinary clinic.

mod cli;
mod shell;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
