//! # Output Formatting
//!
//! - **Text**: human-readable output with colors
//! - **JSON**: a single pretty-printed JSON document on stdout
//!
//! Log output always goes to stderr, so stdout stays parseable in JSON mode.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

/// Output format for commands that print data
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty text output (default on a terminal)
    Text,
    /// Single JSON document
    Json,
}

/// Write `value` as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(mut writer: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    write_json(std::io::stdout().lock(), value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_write_json_is_parseable_and_newline_terminated() {
        let mut out = Vec::new();
        write_json(&mut out, &json!({"id": "p1", "blocks": []})).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("}\n"));
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["id"], "p1");
    }
}
