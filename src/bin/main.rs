use std::process;

use clap::Parser;
use log::error;

use parser::Cli;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    let cli = Cli::parse();

    logger::init(cli.verbose + u8::from(!cli.quiet));

    if let Err(e) = cli.serialize() {
        error!("{e}");
        process::exit(1);
    }

    if let Err(e) = ancestral_rs::run(cli) {
        error!("{e:?}");
        process::exit(1);
    }
}
