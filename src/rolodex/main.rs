//! # rolodex
//!
//! Command-line front end for the rolodex library. See `cli/mod.rs` for how
//! commands, the shell and autosave behave.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
