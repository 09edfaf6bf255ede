// Generate the logwork(1) man page from the CLI definition
//
// Usage: generate-man [OUTPUT]   (writes to stdout when OUTPUT is omitted)

use std::fs::File;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::CommandFactory;
use logwork::cli::Cli;

fn main() -> Result<()> {
    let man = clap_mangen::Man::new(Cli::command());

    let mut buffer: Vec<u8> = Vec::new();
    man.render(&mut buffer).context("Failed to render man page")?;

    match std::env::args().nth(1) {
        Some(path) => {
            let mut file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path))?;
            file.write_all(&buffer)
                .with_context(|| format!("Failed to write {}", path))?;
        }
        None => io::stdout().write_all(&buffer).context("Failed to write man page")?,
    }
    Ok(())
}
