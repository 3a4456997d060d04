//! Command-line front end driving the screen containers headlessly.

mod commands;
mod display;
mod run;

pub use commands::{Cli, Command};
pub use run::run;
