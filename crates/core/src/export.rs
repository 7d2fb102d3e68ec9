//! Serialisation of a (filtered) record list to JSON or CSV.
//!
//! Field names follow the record structs' serde names, which are the
//! contract other application layers depend on.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(CoreError::Export(format!(
                "Unknown export format '{other}'. Must be one of: json, csv"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render `records` in the requested format.
pub fn render<T: Serialize>(records: &[&T], format: ExportFormat) -> Result<String, CoreError> {
    match format {
        ExportFormat::Json => {
            serde_json::to_string_pretty(records).map_err(|e| CoreError::Export(e.to_string()))
        }
        ExportFormat::Csv => build_csv(records),
    }
}

/// Build a CSV document: a header row then one row per record.
///
/// Columns come from the first record's fields with `id` first and the rest
/// in alphabetical order. An empty input yields an empty string.
pub fn build_csv<T: Serialize>(records: &[&T]) -> Result<String, CoreError> {
    let rows = records
        .iter()
        .map(|r| match serde_json::to_value(r) {
            Ok(serde_json::Value::Object(map)) => Ok(map),
            Ok(_) => Err(CoreError::Export(
                "CSV export requires records that serialise to objects".to_string(),
            )),
            Err(e) => Err(CoreError::Export(e.to_string())),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let Some(first) = rows.first() else {
        return Ok(String::new());
    };

    let mut columns: Vec<&str> = first
        .keys()
        .map(String::as_str)
        .filter(|k| *k != "id")
        .collect();
    columns.sort_unstable();
    if first.contains_key("id") {
        columns.insert(0, "id");
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        columns
            .iter()
            .map(|c| csv_escape(c))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in &rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|c| {
                let value = row.get(*c).unwrap_or(&serde_json::Value::Null);
                csv_escape(&json_value_to_csv(value))
            })
            .collect();
        lines.push(cells.join(","));
    }

    Ok(lines.join("\n"))
}

/// Escape a value for CSV: wrap in quotes if it contains a comma, quote, CR or LF.
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Convert a JSON value to a CSV-friendly string.
fn json_value_to_csv(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => arr
            .iter()
            .map(json_value_to_csv)
            .collect::<Vec<_>>()
            .join(";"),
        serde_json::Value::Object(_) => value.to_string(),
    }
}
