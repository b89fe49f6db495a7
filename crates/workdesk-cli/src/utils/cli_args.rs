use clap::Args;
use is_terminal::IsTerminal;

use crate::output::OutputFormat;

/// Shared clap argument for commands that accept an output format.
#[derive(Args, Clone, Debug, PartialEq, Eq)]
pub struct FormatArg {
    /// Output format (`--format` / `-f`)
    #[arg(short = 'f', long = "format", value_enum, env = "WORKDESK_OUTPUT_FORMAT")]
    pub format: Option<OutputFormat>,
}

impl FormatArg {
    /// Returns the effective output format. If output is piped and no format
    /// is specified, defaults to JSON for better machine readability.
    #[must_use]
    pub fn resolve(&self) -> OutputFormat {
        self.resolve_for(std::io::stdout().is_terminal())
    }

    fn resolve_for(&self, stdout_is_terminal: bool) -> OutputFormat {
        match self.format {
            Some(format) => format,
            None if stdout_is_terminal => OutputFormat::Text,
            None => OutputFormat::Json,
        }
    }
}
