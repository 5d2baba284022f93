//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Commute worklog.
///
/// Turns the clock-in / clock-out log written by the commute recorder into
/// paid work sessions, and mirrors the phone's battery onto SmartThings.
#[derive(Debug, Parser)]
#[command(name = "wl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the pay report for every completed shift.
    Report {
        /// Commute log to read (defaults to the configured `log_path`).
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Write the pay report as a spreadsheet-ready CSV file.
    Export {
        /// Commute log to read (defaults to the configured `log_path`).
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// CSV file to write (defaults to the configured `report_path`).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Push the phone's battery level and power source to SmartThings.
    Battery {
        /// SmartThings device ID (defaults to the configured `device_id`).
        #[arg(long)]
        device: Option<String>,
    },
}
