//! Shared helpers for the CLI commands.
//!
//! - [`cli_args`]: clap arguments reused across commands
//! - [`logging`]: tracing subscriber and color control

pub mod cli_args;
pub mod logging;
