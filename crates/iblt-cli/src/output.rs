// crates/iblt-cli/src/output.rs
//
// Output formatting for the iblt CLI.
// Supports table and JSON output modes.

use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed table output (default).
    #[default]
    Table,
    /// JSON output for machine consumption.
    Json,
}

/// A key/value pair rendered for display. Bytes that are not valid UTF-8
/// are replaced with U+FFFD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct PairRow {
    pub key: String,
    pub value: String,
}

impl PairRow {
    pub fn new(key: &[u8], value: &[u8]) -> Self {
        Self {
            key: String::from_utf8_lossy(key).into_owned(),
            value: String::from_utf8_lossy(value).into_owned(),
        }
    }
}

/// A pair held by only one side of a diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct DiffRow {
    /// "local" or "remote".
    pub side: String,
    pub key: String,
    pub value: String,
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}
