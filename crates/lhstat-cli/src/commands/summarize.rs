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

//! Summarize command - per-key statistics for one collection

use super::write_output;
use crate::error::CliError;
use crate::present::{render, OutputFormat};
use lhstat_core::{aggregate, AggregateOptions, FieldFilter, Record, ReportStore};
use tracing::info;

/// Aggregate a collection and return its filtered rows.
///
/// # Errors
///
/// Returns `Err` if the collection is missing or any report in it is
/// unreadable or malformed.
pub fn summarize_rows(
    store: &ReportStore,
    collection: &str,
    options: &AggregateOptions,
    filter: &FieldFilter,
) -> Result<Vec<Record>, CliError> {
    let rows = aggregate(store, collection, options)?;
    info!(collection, rows = rows.len(), "summarized collection");

    let mut records: Vec<Record> = rows.iter().map(|row| row.to_record()).collect();
    filter.apply(&mut records);
    Ok(records)
}

/// Print the summary table (or JSON) of a collection.
///
/// # Examples
///
/// ```no_run
/// use lhstat_cli::commands::{open_store, summarize};
/// use lhstat_cli::present::OutputFormat;
/// use lhstat_core::{AggregateOptions, EntryKind, FieldFilter};
/// use std::path::Path;
///
/// # fn main() -> Result<(), lhstat_cli::error::CliError> {
/// let store = open_store(Path::new("lhstat-results"));
/// summarize(
///     &store,
///     "nightly",
///     &AggregateOptions::new(EntryKind::Metrics),
///     &FieldFilter::with_default_exclusions(),
///     OutputFormat::Table,
/// )?;
/// # Ok(())
/// # }
/// ```
pub fn summarize(
    store: &ReportStore,
    collection: &str,
    options: &AggregateOptions,
    filter: &FieldFilter,
    format: OutputFormat,
) -> Result<(), CliError> {
    let records = summarize_rows(store, collection, options, filter)?;
    write_output(&render(&records, format)?)
}
