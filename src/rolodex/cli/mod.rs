//! # CLI
//!
//! This is **one possible UI client** for rolodex, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and
//! output formatting. For the overall architecture, see the library docs.
//!
//! ## One-shot and Shell
//!
//! Every invocation loads the book from the data directory first.
//!
//! - `rolodex add-phone max 1234567890` runs one command, prints the result,
//!   and saves if the book changed and `autosave` is on.
//! - `rolodex` with no command lists the book.
//! - `rolodex shell` reads one command per line from stdin using the same
//!   grammar (quotes group words). `exit`, `close` or `quit` save and leave;
//!   end of input saves too. Errors are printed and the session continues.
//!
//! ## Data Directory
//!
//! `$ROLODEX_HOME` if set, otherwise the OS data dir (`directories`). It holds
//! `config.json` and the book file named by `data-file`.
//!
//! ## Logging
//!
//! `tracing` output goes to stderr, filtered by `$ROLODEX_LOG` (default
//! `warn`). `--verbose` turns on debug output.

mod commands;
mod print;
mod setup;
mod telemetry;

pub use commands::run;
