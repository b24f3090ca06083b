use clap::Parser;
use parser::Cli;

/// Parse a `argv`-shaped slice (program name included) and run it through
/// the crate's dispatch exactly as the `ancestral-rs` binary does.
pub fn run_cli(args: &[&str]) -> anyhow::Result<()> {
    let cli = Cli::parse_from(args);
    ancestral_rs::run(cli)
}
