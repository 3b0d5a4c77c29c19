//! # CLI Layer
//!
//! The only place that knows about stdout, stderr and exit codes. It parses
//! arguments with clap, sets up logging, calls into `zk::commands` and prints
//! the returned messages.
//!
//! - `setup`: clap definitions and the version string
//! - `commands`: dispatch and per-command handlers
//! - `print`: message and error output

mod commands;
mod print;
mod setup;

pub use commands::run;
pub use print::report;
