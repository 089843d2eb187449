//! # CLI Layer
//!
//! One possible client of the roster library. It is the only place that
//! parses arguments, reads stdin, prints, or decides exit codes.
//!
//! ## Non-interactive use
//!
//! Each subcommand runs once against the data directory and exits. Adding,
//! editing and deleting rewrite the text file immediately, and every run
//! starts by loading it back (see `config autoload`), so successive commands
//! see each other's changes.
//!
//! `add` takes any field as an option and asks for the rest. `edit` asks for
//! a missing value and then for confirmation unless `--yes` is given.
//!
//! ## Interactive menu
//!
//! `roster` with no command opens a numbered menu over the same operations
//! and keeps going until `0` or end of input. Errors are printed and the menu
//! continues.
//!
//! ## Module Structure
//!
//! - `setup`: clap argument definitions
//! - `commands`: dispatch, per-command handlers and the menu
//! - `prompt`: reprompt-until-valid input loops and y/n confirmation
//! - `print`: colored message and change output

mod commands;
mod print;
mod prompt;
pub mod setup;

pub use commands::run;
