//! pyreflow - comment reflow tool for Python source files
//!
//! Rewrites comment regions so no line exceeds a configured column width:
//! commented-out print statements, trailing inline comments, runs of
//! overlong full-line comments, and existing triple-quoted blocks.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod formatter;
pub mod process;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::Config;
pub use error::Result;
pub use formatter::{BlackFormatter, CodeFormatter};
