//! CLI module for opstrack - process arguments and the interactive session.
//!
//! The binary parses [`Cli`], then hands stdin/stdout to [`repl::run`].

pub mod commands;
pub mod repl;

pub use commands::{Cli, SessionCommand, SessionLine};
