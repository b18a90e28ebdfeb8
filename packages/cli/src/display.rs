//! Terminal rendering of documents, parts lists and render results

use colored::Colorize;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use wiredit_common::ErrorKind;
use wiredit_preview::{PartsList, RenderResult};

pub fn parts_table(parts: &PartsList) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            parts
                .headers
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
        );

    for row in parts.display_rows() {
        table.add_row(row);
    }
    table
}

pub fn print_parts(parts: Option<&PartsList>) {
    match parts {
        Some(parts) => {
            println!("{}", parts_table(parts));
            println!("Total components: {}", parts.total_components());
        }
        None => println!("{}", "No bill of materials data available".dimmed()),
    }
}

/// Document with right-aligned line numbers
pub fn numbered_lines(text: &str) -> String {
    let count = text.lines().count();
    let width = count.max(1).to_string().len();

    text.lines()
        .enumerate()
        .map(|(i, line)| format!("{:>width$} | {}", i + 1, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line summary of a published render
pub fn render_summary(result: &RenderResult) -> String {
    match &result.outcome {
        Ok(diagram) => {
            let parts = diagram
                .parts()
                .map(|p| format!(", {} parts", p.total_components()))
                .unwrap_or_default();
            format!(
                "{} {} preview #{}{}",
                "✓".green(),
                result.format,
                result.token,
                parts
            )
        }
        Err(err) => {
            let label = match err.kind() {
                ErrorKind::Transport => "Connection error:",
                _ => "Render error:",
            };
            format!("{} {} {}", "✗".red(), label.red().bold(), err)
        }
    }
}
