//! TPA CLI - `tpa` command over a file-backed program store
//!
//! Data goes to stdout; notifications and logs go to stderr.

#![warn(unreachable_pub)]

pub mod app;
pub mod args;
pub mod logging;
pub mod terminal;

pub use app::{run, RunStatus};
pub use args::{Action, Cli, ProgramFields};
pub use logging::init_tracing;
pub use terminal::{StdinConfirmation, TerminalNotifier};
