//! CLI entry point for the socket-matching tile solver

use clap::Parser;
use socketwfc::io::cli::{Cli, SceneRunner};
use socketwfc::io::logging::init_tracing;

fn main() -> socketwfc::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level());
    let runner = SceneRunner::new(cli);
    runner.run()
}
