use std::path::PathBuf;

use anyhow::{bail, Result};

mod keymap;
mod run;

fn main() -> Result<()> {
    env_logger::init();

    let rom: PathBuf = match std::env::args_os().nth(1) {
        Some(path) => PathBuf::from(path),
        None => bail!("usage: chip8 <rom>"),
    };
    run::run(rom)
}
