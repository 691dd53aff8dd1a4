//! Output helpers shared by command handlers

use anyhow::Result;
use colored::{ColoredString, Colorize};
use comfy_table::Table;
use serde::Serialize;

#[derive(Debug, Clone, Copy, clap::ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text and tables
    #[default]
    Table,
    /// JSON output
    Json,
}

impl OutputFormat {
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Highlight a value in human-readable output
pub fn emph(text: &str) -> ColoredString {
    text.blue().bold()
}

/// Style a warning paragraph
pub fn warn(text: &str) -> ColoredString {
    text.yellow()
}

pub fn print_json<T: Serialize>(data: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Build a table with the given headers and rows
pub fn build_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut table = Table::new();
    table.set_header(headers.to_vec());
    for row in rows {
        table.add_row(row);
    }
    table
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    println!("{}", build_table(headers, rows));
}
