//! Bugbuster CLI binary entry point.
//! Resolves effective options, then drives the requested tools over the
//! requested files.

use bugbuster::{cli::Cli, config, orchestrate};
use clap::Parser;
use std::path::Path;

fn main() {
    let cli = Cli::parse();
    let cfg = config::load_config(Path::new(&cli.config)).unwrap_or_default();
    let eff = config::resolve_effective(&cli, &cfg);
    if eff.files.is_empty() {
        println!("No files specified");
        return;
    }
    orchestrate::run_batch(&eff);
}
