//! Commute worklog CLI library.
//!
//! Argument parsing, configuration and the subcommand implementations behind
//! the `wl` binary.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
