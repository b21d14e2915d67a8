//! CLI command definitions using clap.
//!
//! `Cli` is the process command line. `SessionLine` parses each line typed
//! into a running session:
//! - add / import / export / edit / apply / reset: change or save the table
//! - list / stats / categories: show parts of the screen
//! - help / quit

use crate::domain::Priority;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// opstrack - track business operations updates from the terminal
#[derive(Parser, Debug)]
#[command(name = "opstrack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// CSV file to import when the session starts
    #[arg(short, long)]
    pub import: Option<PathBuf>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Default log level: `debug` when verbose, else the configured level
    pub fn log_level<'a>(&self, configured: Option<&'a str>) -> Option<&'a str> {
        if self.verbose { Some("debug") } else { configured }
    }
}

/// One line of session input.
#[derive(Parser, Debug)]
#[command(name = "opstrack", no_binary_name = true, disable_help_subcommand = true)]
#[command(disable_version_flag = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

/// Commands accepted inside a session
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Log a new update
    Add {
        /// Category from the list (see `categories`), or Custom
        category: String,

        /// What happened
        description: String,

        /// Category name to use when the category is Custom
        #[arg(long)]
        custom: Option<String>,

        /// High, Medium or Low
        #[arg(short, long)]
        priority: Option<Priority>,
    },

    /// Upload or merge updates from a CSV file
    Import {
        /// CSV with columns ID, Category, Update, Status, Priority, Date Logged
        file: PathBuf,
    },

    /// Save the activity log as CSV
    Export {
        /// Destination file
        file: PathBuf,
    },

    /// Change one cell of the activity log
    Edit {
        /// Update ID, e.g. UPDATE-1001
        id: String,

        /// Column: update, status or priority
        column: String,

        /// New value
        value: String,
    },

    /// Apply an edited copy of the activity log from a CSV file
    Apply {
        /// CSV in the export format, one row per update in display order
        file: PathBuf,
    },

    /// Show the activity log
    #[command(alias = "ls")]
    List,

    /// Show the dashboard
    Stats {
        /// Print the aggregates as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the category choices
    Categories,

    /// Clear every update and start over
    Reset,

    /// Show available commands
    Help,

    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}
