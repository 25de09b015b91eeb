//! CLI entry point for the maze generator

use clap::Parser;
use mazegen::io::cli::{Cli, MazeRunner};
use tracing_subscriber::EnvFilter;

fn main() -> mazegen::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(cli.log_level().into()))
        .with_writer(std::io::stderr)
        .init();

    MazeRunner::new(cli).run()
}
