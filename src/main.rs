//! TICK: Timeline Interval ChecKer
//!
//! Usage: tick [FILES]...

use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process;

use tick_intervals::order::{OrderCommand, OrderError};
use tick_intervals::reader::Source;

#[derive(Parser)]
#[command(name = "tick")]
#[command(version)]
#[command(
    about = "TICK: Timeline Interval ChecKer - sorts keyed interval fixtures by end timestamp and rejects overlaps",
    long_about = None
)]
struct Cli {
    /// Input files (use - for stdin); standard input is read when none are given
    files: Vec<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let sources: Vec<Source> = cli.files.iter().map(Source::from_arg).collect();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let cmd = OrderCommand::new();
    if let Err(e) = cmd.run(&sources, &mut handle) {
        match e {
            // the two-line diagnostic goes out verbatim, with no prefix
            OrderError::Violation(v) => eprintln!("{}", v),
            other => eprintln!("Error: {}", other),
        }
        process::exit(1);
    }
}
