//! Delimited-text decoding into header-keyed rows.
//!
//! This layer is purely syntactic: it knows nothing about metric or
//! office semantics. Both source datasets go through it.

use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{EsgError, Result};

/// One decoded row: header name to raw cell text
#[derive(Debug, Clone, Default)]
pub struct Row {
    cells: HashMap<String, String>,
}

impl Row {
    /// Raw cell text for a column, or "" when the column is absent
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }

    /// True when every cell in the row is blank
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|v| v.trim().is_empty())
    }

    #[cfg(test)]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            cells: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Decode delimited text with a header row into an ordered sequence of
/// rows, skipping fully empty lines
pub fn decode_str(text: &str) -> Result<Vec<Row>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| EsgError::Decode {
            reason: format!("missing or malformed header row: {e}"),
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| EsgError::Decode {
            reason: format!("malformed record: {e}"),
        })?;

        let row = Row {
            cells: headers
                .iter()
                .zip(record.iter())
                .map(|(h, cell)| (h.clone(), cell.to_string()))
                .collect(),
        };

        if !row.is_blank() {
            rows.push(row);
        }
    }

    Ok(rows)
}

/// Decode a delimited-text file from disk
pub fn decode_path(path: &Path) -> Result<Vec<Row>> {
    if !path.exists() {
        return Err(EsgError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::InvalidData => EsgError::Decode {
            reason: format!("{}: not valid UTF-8 text", path.display()),
        },
        _ => EsgError::Io(e),
    })?;
    decode_str(&text)
}
