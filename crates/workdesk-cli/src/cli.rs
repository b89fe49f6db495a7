//! # CLI Structure and Argument Parsing
//!
//! ```bash
//! # Page views
//! workdesk notes show a1b2c3 --max-blocks 20
//! workdesk notes summary a1b2c3 --max-length 300 --refresh
//! workdesk notes recent --days 3 --limit 2
//! workdesk notes index --database d4e5f6
//!
//! # Cache maintenance
//! workdesk cache status
//! workdesk cache clear --force
//!
//! # Configuration
//! workdesk config show
//! workdesk config init
//! ```
//!
//! Commands that print data accept `-f/--format text|json`. Without the flag,
//! JSON is used when stdout is not a terminal.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use crate::utils::cli_args::FormatArg;

/// Main CLI structure for the `workdesk` command
#[derive(Parser, Clone, Debug)]
#[command(name = "workdesk")]
#[command(version)]
#[command(about = "workdesk - cached notes pages and summaries", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to the configuration file
    #[arg(long, global = true, value_name = "FILE", env = "WORKDESK_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Top-level command groups
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Read pages from the notes service (cached for 24 hours)
    Notes {
        #[command(subcommand)]
        command: NotesCommand,
    },

    /// Inspect or clear the local document cache
    Cache {
        #[command(subcommand)]
        command: CacheCommand,
    },

    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Page view commands
#[derive(Subcommand, Clone, Debug)]
pub enum NotesCommand {
    /// Show a page's title, metadata and leading blocks as plain text
    Show {
        /// Page id
        page_id: String,

        /// Maximum number of blocks to include [default: from config]
        #[arg(long, value_name = "N")]
        max_blocks: Option<usize>,

        /// Bypass the cache and fetch the page again
        #[arg(long)]
        refresh: bool,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Summarize a page within a character budget
    Summary {
        /// Page id
        page_id: String,

        /// Maximum summary length in characters [default: from config]
        #[arg(long, value_name = "N")]
        max_length: Option<usize>,

        /// Bypass the cache and fetch the page again
        #[arg(long)]
        refresh: bool,

        #[command(flatten)]
        format: FormatArg,
    },

    /// List recently edited pages with summaries of the newest ones
    Recent {
        /// Look-back window in days [default: from config]
        #[arg(long, value_name = "N")]
        days: Option<u32>,

        /// Number of pages to summarize [default: from config]
        #[arg(long, value_name = "N")]
        limit: Option<usize>,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Build an index of the pages visible to the integration
    Index {
        /// Restrict the search to page objects of this database
        #[arg(long, value_name = "ID")]
        database: Option<String>,

        #[command(flatten)]
        format: FormatArg,
    },
}

/// Cache maintenance commands
#[derive(Subcommand, Clone, Debug)]
pub enum CacheCommand {
    /// List cached entries with their age and freshness
    Status {
        #[command(flatten)]
        format: FormatArg,
    },

    /// Delete every cached entry
    Clear {
        /// Skip the confirmation prompt
        #[arg(short = 'f', long)]
        force: bool,
    },
}

/// Configuration commands
#[derive(Subcommand, Clone, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration and the file it came from
    Show {
        #[command(flatten)]
        format: FormatArg,
    },

    /// Write a config file with the default settings
    Init {
        /// Overwrite an existing config file
        #[arg(short = 'f', long)]
        force: bool,
    },
}

impl Commands {
    /// Output format the command will print in, if it prints data.
    pub fn output_format(&self) -> Option<OutputFormat> {
        let format = match self {
            Self::Notes { command } => match command {
                NotesCommand::Show { format, .. }
                | NotesCommand::Summary { format, .. }
                | NotesCommand::Recent { format, .. }
                | NotesCommand::Index { format, .. } => format,
            },
            Self::Cache { command } => match command {
                CacheCommand::Status { format } => format,
                CacheCommand::Clear { .. } => return None,
            },
            Self::Config { command } => match command {
                ConfigCommand::Show { format } => format,
                ConfigCommand::Init { .. } => return None,
            },
        };
        Some(format.resolve())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_summary_with_options() {
        let cli = Cli::try_parse_from([
            "workdesk",
            "notes",
            "summary",
            "abc123",
            "--max-length",
            "120",
            "--refresh",
            "-f",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Notes {
                command:
                    NotesCommand::Summary {
                        page_id,
                        max_length,
                        refresh,
                        format,
                    },
            } => {
                assert_eq!(page_id, "abc123");
                assert_eq!(max_length, Some(120));
                assert!(refresh);
                assert_eq!(format.format, Some(OutputFormat::Json));
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["workdesk", "cache", "status", "-q", "--no-color"]).unwrap();
        assert!(cli.quiet);
        assert!(cli.no_color);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["workdesk", "-v", "-q", "cache", "status"]).is_err());
    }

    #[test]
    fn test_clear_has_no_output_format() {
        let cli = Cli::try_parse_from(["workdesk", "cache", "clear", "--force"]).unwrap();
        assert_eq!(cli.command.output_format(), None);
    }

    #[test]
    fn test_explicit_format_is_reported() {
        let cli = Cli::try_parse_from(["workdesk", "notes", "index", "--format", "text"]).unwrap();
        assert_eq!(cli.command.output_format(), Some(OutputFormat::Text));
    }

    #[test]
    fn test_config_init_parses_force() {
        let cli = Cli::try_parse_from(["workdesk", "config", "init", "--force"]).unwrap();
        match cli.command {
            Commands::Config {
                command: ConfigCommand::Init { force },
            } => assert!(force),
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(
            Cli::try_parse_from(["workdesk", "config", "init"])
                .unwrap()
                .command
                .output_format(),
            None
        );
    }

    #[test]
    fn test_page_id_is_required() {
        assert!(Cli::try_parse_from(["workdesk", "notes", "show"]).is_err());
    }
}
