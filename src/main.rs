use clap::Parser;

use normal_mle::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    run(Cli::parse())
}
