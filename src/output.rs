//! Rendering of lookup results.

use crate::schema::Hit;
use anyhow::Result;
use clap::ValueEnum;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One `Category/Value/Code/Description` block per record
    #[default]
    Text,
    Json,
    Yaml,
}

pub fn render(hits: &[Hit], format: Format) -> Result<String> {
    let output = match format {
        Format::Text => render_text(hits),
        Format::Json => serde_json::to_string_pretty(hits)? + "\n",
        Format::Yaml => serde_yaml::to_string(hits)?,
    };
    Ok(output)
}

/// Plain text blocks, each followed by a blank line.
pub fn render_text(hits: &[Hit]) -> String {
    let mut out = String::new();
    for hit in hits {
        let _ = writeln!(out, "Category: {}", hit.category);
        let _ = writeln!(out, "Value: {}", hit.record.value);
        let _ = writeln!(out, "Code: {}", hit.record.code);
        let _ = writeln!(out, "Description: {}", hit.record.description);
        out.push('\n');
    }
    out
}
