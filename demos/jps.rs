//! Jump Point Search from the command line.
//!
//! Run: cargo run --bin jps -- --random 64x64 --density 0.3 --seed 7 --render

use clap::Parser;
use gridjump_demos::{Cli, run};

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut out = std::io::stdout().lock();
    match run(&cli, &mut out) {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
