//! Library half of the `appdeck-runner` binary.
//!
//! Kept separate from `main.rs` so argument parsing, configuration and the
//! subcommand handlers can be tested without going through the process.

pub mod cli;
pub mod commands;
pub mod config;
pub mod reply;
