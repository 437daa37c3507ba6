// Dweve lhstat - Lighthouse Report Statistics
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Presenter - renders result rows as a text table or a JSON array.
//!
//! Rows are semi-structured: after filtering, two rows may not share the
//! same columns. The table uses the ordered union of all column names and
//! leaves a cell blank where a row has no value.

use crate::error::CliError;
use colored::Colorize;
use lhstat_core::{FieldValue, Record};

/// Output format for result rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned, human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON array
    Json,
}

impl OutputFormat {
    /// `Json` if `json` is set, otherwise `Table`.
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}

/// Render rows in the requested format.
pub fn render(rows: &[Record], format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => Ok(render_table(rows)),
        OutputFormat::Json => render_json(rows),
    }
}

/// Render rows as a JSON array, one object per row.
///
/// Field order is preserved, absent values are omitted and non-finite
/// numbers become `null`.
pub fn render_json(rows: &[Record]) -> Result<String, CliError> {
    let mut out = serde_json::to_string_pretty(rows)?;
    out.push('\n');
    Ok(out)
}

/// Render rows as a column-aligned table.
pub fn render_table(rows: &[Record]) -> String {
    if rows.is_empty() {
        return "No rows.\n".to_string();
    }

    let columns = column_union(rows);
    let cells: Vec<Vec<(String, bool)>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| match row.get(column) {
                    Some(value) => (value.to_string(), is_numeric(value)),
                    None => (String::new(), false),
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            cells
                .iter()
                .map(|row| row[i].0.chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(column, &width)| pad(column, width, false).bold().to_string())
        .collect();
    push_line(&mut out, &header);

    let rule: Vec<String> = widths.iter().map(|&width| "-".repeat(width)).collect();
    push_line(&mut out, &rule);

    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|((text, numeric), &width)| pad(text, width, *numeric))
            .collect();
        push_line(&mut out, &line);
    }
    out
}

fn column_union(rows: &[Record]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for name in row.names() {
            if !columns.iter().any(|c| c == name) {
                columns.push(name.to_string());
            }
        }
    }
    columns
}

fn is_numeric(value: &FieldValue) -> bool {
    matches!(value, FieldValue::Number(_) | FieldValue::Count(_))
}

fn pad(text: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(text.chars().count()));
    if right_align {
        format!("{fill}{text}")
    } else {
        format!("{text}{fill}")
    }
}

fn push_line(out: &mut String, cells: &[String]) {
    out.push_str(cells.join("  ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Record> {
        let mut dns = Record::new().with("name", "dns").with("mean", "N/A -> 8");
        dns.insert("mean Δ", None);
        vec![
            Record::new()
                .with("name", "connect")
                .with("mean", "15 -> 20")
                .with("mean Δ", 5.0),
            dns,
        ]
    }

    #[test]
    fn test_table_layout() {
        colored::control::set_override(false);
        let table = render_table(&rows());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "name     mean      mean Δ");
        assert_eq!(lines[1], "-------  --------  ------");
        assert_eq!(lines[2], "connect  15 -> 20       5");
        assert_eq!(lines[3], "dns      N/A -> 8");
    }

    #[test]
    fn test_table_column_union() {
        colored::control::set_override(false);
        let rows = vec![
            Record::new().with("name", "a"),
            Record::new().with("name", "b").with("CV", "10%"),
        ];
        let table = render_table(&rows);
        assert!(table.lines().next().unwrap().contains("CV"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(render_table(&[]), "No rows.\n");
    }

    #[test]
    fn test_json_output() {
        let json = render_json(&rows()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "connect");
        assert_eq!(value[0]["mean Δ"], 5.0);
        assert!(value[1].get("mean Δ").is_none());
    }

    #[test]
    fn test_empty_json() {
        assert_eq!(render_json(&[]).unwrap().trim(), "[]");
    }

    #[test]
    fn test_nan_in_json_is_null() {
        let rows = vec![Record::new().with("stdev", f64::NAN)];
        let value: serde_json::Value = serde_json::from_str(&render_json(&rows).unwrap()).unwrap();
        assert!(value[0]["stdev"].is_null());
    }
}
