//! Command-line interface module.
//!
//! Provides argument parsing and the subcommand handlers.

pub mod args;
pub mod commands;
