//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// One labelled value in a table.
#[derive(Debug, Tabled)]
pub struct Row {
    /// Label
    #[tabled(rename = "Field")]
    pub field: &'static str,
    /// Value
    #[tabled(rename = "Value")]
    pub value: String,
}

impl Row {
    /// Build a row.
    pub fn new(field: &'static str, value: impl ToString) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

/// Print a value as a two-column table, or as JSON.
pub fn print_record<T: Serialize>(item: &T, rows: Vec<Row>, format: OutputFormat) {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".to_string());
            println!("{json}");
        }
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}
