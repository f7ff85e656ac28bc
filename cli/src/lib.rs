//! purlbom command-line library.
//!
//! This crate backs the `purlbom` binary: argument parsing, configuration
//! layering, and output formatting around [`purlbom::generate_metadata`].
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`error`] - CLI error type
//! - [`output`] - Human-readable and JSON output
//! - [`resolve`] - The resolve command

pub mod cli;
pub mod error;
pub mod output;
pub mod resolve;
