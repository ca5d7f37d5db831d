//! Calconnect CLI
//!
//! This crate provides the command-line interface for Calconnect:
//! - run: Start the server
//! - completion: Generate shell completions (hidden)

pub mod commands;

pub use commands::{Cli, Commands};
