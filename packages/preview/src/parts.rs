//! Bill of materials returned alongside a rendered diagram.
//!
//! The service sends tab-separated text: the first line holds the column
//! headers and every following line is one part. Fewer than two lines means
//! there is nothing to show.

use wiredit_common::Download;

pub const PARTS_LIST_FILE_NAME: &str = "bill-of-materials.tsv";
pub const PARTS_LIST_MIME_TYPE: &str = "text/tab-separated-values";

/// Parsed parts list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartsList {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl PartsList {
    /// Parse TSV text. Returns `None` when there is no data row.
    pub fn parse(tsv: &str) -> Option<Self> {
        let lines: Vec<&str> = tsv.trim().lines().collect();
        if lines.len() < 2 {
            return None;
        }

        let split = |line: &str| -> Vec<String> {
            line.split('\t').map(|cell| cell.trim().to_string()).collect()
        };

        Some(Self {
            headers: split(lines[0]),
            rows: lines[1..].iter().map(|line| split(line)).collect(),
        })
    }

    pub fn total_components(&self) -> usize {
        self.rows.len()
    }

    /// Rows with empty cells shown as `-`
    pub fn display_rows(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        self.rows.iter().map(|row| {
            row.iter()
                .map(|cell| if cell.is_empty() { "-" } else { cell.as_str() })
                .collect()
        })
    }
}

/// Encode raw TSV text as a download
pub fn parts_list_download(tsv: &str) -> Download {
    Download::new(PARTS_LIST_FILE_NAME, PARTS_LIST_MIME_TYPE, tsv.as_bytes())
}
