use anyhow::Context;
use clap::Parser;
use traffic_analyzer::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli).context("traffic analysis failed")
}
