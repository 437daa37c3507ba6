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

//! Compare command - deltas between two aggregated collections

use super::write_output;
use crate::error::CliError;
use crate::present::{render, OutputFormat};
use lhstat_core::{
    aggregate, compare as compare_aggregates, AggregateOptions, CompareOptions, FieldFilter,
    Record, ReportStore,
};
use tracing::info;

/// Aggregate both collections, join them and return the filtered rows.
///
/// Both sides are aggregated with the same `options`. Either collection
/// failing to aggregate fails the whole comparison.
pub fn compare_rows(
    store: &ReportStore,
    base: &str,
    other: &str,
    options: &AggregateOptions,
    compare_options: &CompareOptions,
    filter: &FieldFilter,
) -> Result<Vec<Record>, CliError> {
    let base_rows = aggregate(store, base, options)?;
    let other_rows = aggregate(store, other, options)?;

    let joined = compare_aggregates(&base_rows, &other_rows, compare_options);
    info!(
        base,
        other,
        rows = joined.len(),
        sort = %compare_options.sort_field,
        descending = compare_options.descending,
        "compared collections"
    );

    let mut records: Vec<Record> = joined.iter().map(|row| row.to_record()).collect();
    filter.apply(&mut records);
    Ok(records)
}

/// Print the comparison of `other` against `base`.
pub fn compare(
    store: &ReportStore,
    base: &str,
    other: &str,
    options: &AggregateOptions,
    compare_options: &CompareOptions,
    filter: &FieldFilter,
    format: OutputFormat,
) -> Result<(), CliError> {
    let records = compare_rows(store, base, other, options, compare_options, filter)?;
    write_output(&render(&records, format)?)
}
