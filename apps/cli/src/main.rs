//! get-rst — pull embedded reStructuredText out of annotated source files.
//!
//! Scans a source file for `.rst_start`/`.rst_end` and
//! `.code_block_start`/`.code_block_end` comment blocks and writes the
//! assembled document to stdout or a file.

mod commands;
mod footer;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
