//! CLI entry point for the voxel grid solver

use clap::Parser;
use voxelwave::io::cli::{Cli, GenerationRunner};

fn main() -> voxelwave::Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.quiet { "error" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut runner = GenerationRunner::new(cli);
    runner.run().map(|_| ())
}
