//! Whitespace-delimited text tables.
//!
//! Two shapes are read here:
//!
//! - **named tables**: a preamble of `skip_header` lines, one row of column
//!   names, then data rows (posterior-sample files)
//! - **numeric matrices**: data rows only (ellipsoid samples, EOS sequences)
//!
//! Blank lines and lines starting with `#` are ignored in data sections.
//! Line numbers reported in errors are 1-based file lines.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{AppError, ErrorKind};

/// One data row of a named table.
#[derive(Debug, Clone)]
pub struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

/// A parsed named table: header lookup plus raw data rows.
#[derive(Debug, Clone)]
pub struct NamedTable {
    header_map: HashMap<String, usize>,
    n_columns: usize,
    pub records: Vec<Record>,
}

impl NamedTable {
    /// Parse a named table from text.
    pub fn parse(text: &str, skip_header: usize) -> Result<Self, AppError> {
        let mut lines = text.lines().enumerate().skip(skip_header);

        let (header_line, header) = lines
            .by_ref()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .find(|(_, line)| !line.is_empty())
            .ok_or_else(|| {
                AppError::parse(format!(
                    "No column-name row found after skipping {skip_header} header lines."
                ))
            })?;

        let header_map = build_header_map(header);
        if header_map.is_empty() {
            return Err(AppError::parse(format!(
                "Column-name row on line {header_line} is empty."
            )));
        }
        let n_columns = header.trim_start_matches('#').split_whitespace().count();

        let mut records = Vec::new();
        for (idx, line) in lines {
            let trimmed = line.trim();
            if is_skippable(trimmed) {
                continue;
            }
            let fields: Vec<String> = trimmed.split_whitespace().map(str::to_string).collect();
            if fields.len() != n_columns {
                return Err(AppError::parse(format!(
                    "Line {}: expected {n_columns} fields, found {}.",
                    idx + 1,
                    fields.len()
                )));
            }
            records.push(Record { line: idx + 1, fields });
        }

        Ok(Self {
            header_map,
            n_columns,
            records,
        })
    }

    pub fn n_columns(&self) -> usize {
        self.n_columns
    }

    /// Index of a required column.
    pub fn column(&self, name: &str) -> Result<usize, AppError> {
        self.header_map
            .get(&normalize_header_name(name))
            .copied()
            .ok_or_else(|| {
                AppError::new(
                    ErrorKind::MissingColumn,
                    format!("Missing required column: `{name}`"),
                )
            })
    }
}

/// Parse a numeric field of a record.
pub fn field_f64(record: &Record, idx: usize, name: &str) -> Result<f64, AppError> {
    let raw = record.fields.get(idx).ok_or_else(|| {
        AppError::parse(format!("Line {}: missing value for `{name}`.", record.line))
    })?;
    parse_f64(raw).ok_or_else(|| {
        AppError::parse(format!(
            "Line {}: invalid numeric value '{raw}' for `{name}`.",
            record.line
        ))
    })
}

/// Parse a header-less numeric matrix.
///
/// Every row must have the same number of columns, and at least `min_columns`.
pub fn parse_numeric_rows(text: &str, min_columns: usize) -> Result<Vec<Vec<f64>>, AppError> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut width: Option<usize> = None;

    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if is_skippable(trimmed) {
            continue;
        }
        let line_no = idx + 1;

        let row = trimmed
            .split_whitespace()
            .map(|raw| {
                parse_f64(raw).ok_or_else(|| {
                    AppError::parse(format!("Line {line_no}: invalid numeric value '{raw}'."))
                })
            })
            .collect::<Result<Vec<f64>, AppError>>()?;

        match width {
            None => {
                if row.len() < min_columns {
                    return Err(AppError::parse(format!(
                        "Line {line_no}: expected at least {min_columns} columns, found {}.",
                        row.len()
                    )));
                }
                width = Some(row.len());
            }
            Some(w) if w != row.len() => {
                return Err(AppError::parse(format!(
                    "Line {line_no}: expected {w} columns, found {}.",
                    row.len()
                )));
            }
            Some(_) => {}
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Read a whole text file, mapping failures to an I/O error naming the file.
pub fn read_text(path: &Path, what: &str) -> Result<String, AppError> {
    fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read {what} '{}': {e}", path.display())))
}

fn build_header_map(header: &str) -> HashMap<String, usize> {
    header
        .trim_start_matches('#')
        .split_whitespace()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Files written on some platforms carry a BOM on the first token.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn is_skippable(line: &str) -> bool {
    line.is_empty() || line.starts_with('#')
}

fn parse_f64(raw: &str) -> Option<f64> {
    let v = raw.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}
