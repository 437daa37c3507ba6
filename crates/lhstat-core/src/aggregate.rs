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

//! Cross-run aggregation.
//!
//! Every report contributes at most one sample per (target, entry name):
//! a run that logs the same name several times contributes the sum of
//! those values. Samples from all runs of a collection are then summarized
//! per key.
//!
//! # Example
//!
//! ```
//! use lhstat_core::{aggregate_reports, AggregateOptions, EntryKind, MeasurementReport};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let runs = [
//!     r#"{"requestedUrl": "https://example.com", "timing": {"entries": [{"name": "connect", "duration": 10}]}}"#,
//!     r#"{"requestedUrl": "https://example.com", "timing": {"entries": [{"name": "connect", "duration": 20}]}}"#,
//! ];
//! let reports = runs
//!     .iter()
//!     .map(|text| MeasurementReport::from_json(text))
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! let rows = aggregate_reports(&reports, &AggregateOptions::new(EntryKind::Timings))?;
//! assert_eq!(rows[0].sample_count, 2);
//! assert_eq!(rows[0].mean, 15.0);
//! assert_eq!(rows[0].stdev, 7.1);
//! # Ok(())
//! # }
//! ```

use crate::error::CoreResult;
use crate::filter::compile_pattern;
use crate::key::GroupKey;
use crate::record::Record;
use crate::report::{EntryKind, MeasurementReport};
use crate::stats::{format_percent, locale_cmp, Summary};
use crate::store::ReportStore;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Query parameters for one aggregation call.
#[derive(Debug, Clone, Default)]
pub struct AggregateOptions {
    /// Which entry view each report contributes
    pub kind: EntryKind,
    /// Keep only entries whose name matches (case-insensitive)
    pub include: Option<Regex>,
}

impl AggregateOptions {
    /// Options for `kind` with no inclusion pattern.
    pub fn new(kind: EntryKind) -> Self {
        Self {
            kind,
            include: None,
        }
    }

    /// Restrict aggregation to entry names matching `pattern`.
    pub fn with_include(mut self, pattern: &str) -> CoreResult<Self> {
        self.include = Some(compile_pattern(pattern)?);
        Ok(self)
    }

    fn includes(&self, name: &str) -> bool {
        self.include.as_ref().map_or(true, |re| re.is_match(name))
    }
}

/// The five statistics carried by an aggregated row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatField {
    /// Arithmetic mean
    #[default]
    Mean,
    /// Sample standard deviation
    Stdev,
    /// Coefficient of variation
    Cv,
    /// Minimum
    Min,
    /// Maximum
    Max,
}

impl StatField {
    /// All fields in column order.
    pub const ALL: [StatField; 5] = [
        StatField::Mean,
        StatField::Stdev,
        StatField::Cv,
        StatField::Min,
        StatField::Max,
    ];

    /// Column name in result rows.
    pub fn column(self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Stdev => "stdev",
            Self::Cv => "CV",
            Self::Min => "min",
            Self::Max => "max",
        }
    }

    /// Column name of this field's delta in comparison rows.
    pub fn delta_column(self) -> String {
        format!("{} Δ", self.column())
    }

    /// Render a value of this field.
    pub fn format(self, value: f64) -> String {
        match self {
            Self::Cv => format_percent(value),
            _ => crate::stats::format_number(value),
        }
    }
}

impl fmt::Display for StatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Summary of one (target, entry name) sample set.
///
/// Statistics are rounded to one decimal place.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRow {
    /// Grouping key
    pub key: GroupKey,
    /// Entry name
    pub name: String,
    /// Audited target
    pub target: String,
    /// Number of runs that produced this key
    pub sample_count: usize,
    /// Mean across runs
    pub mean: f64,
    /// Sample standard deviation, `NaN` for a single run
    pub stdev: f64,
    /// `stdev / mean` in percent
    pub coefficient_of_variation: f64,
    /// Smallest run value
    pub min: f64,
    /// Largest run value
    pub max: f64,
}

impl AggregatedRow {
    fn from_samples(key: GroupKey, samples: &[f64]) -> Option<Self> {
        let summary = Summary::from_samples(samples)?.rounded();
        let (target, name) = key.split();
        let (target, name) = (target.to_string(), name.to_string());
        Some(Self {
            key,
            name,
            target,
            sample_count: summary.count,
            mean: summary.mean,
            stdev: summary.stdev,
            coefficient_of_variation: summary.cv,
            min: summary.min,
            max: summary.max,
        })
    }

    /// Value of one statistic.
    pub fn stat(&self, field: StatField) -> f64 {
        match field {
            StatField::Mean => self.mean,
            StatField::Stdev => self.stdev,
            StatField::Cv => self.coefficient_of_variation,
            StatField::Min => self.min,
            StatField::Max => self.max,
        }
    }

    /// Presentation form: `name, target, n, mean, stdev, CV, min, max`.
    pub fn to_record(&self) -> Record {
        Record::new()
            .with("name", self.name.as_str())
            .with("target", self.target.as_str())
            .with("n", self.sample_count)
            .with("mean", self.mean)
            .with("stdev", self.stdev)
            .with("CV", format_percent(self.coefficient_of_variation))
            .with("min", self.min)
            .with("max", self.max)
    }
}

/// Load a collection from the store and aggregate it.
///
/// # Errors
///
/// Fails if the collection is missing or any of its reports cannot be read
/// or parsed.
pub fn aggregate(
    store: &ReportStore,
    collection: &str,
    options: &AggregateOptions,
) -> CoreResult<Vec<AggregatedRow>> {
    let reports = store.load(collection)?;
    let rows = aggregate_reports(&reports, options)?;
    debug!(
        collection,
        kind = %options.kind,
        reports = reports.len(),
        rows = rows.len(),
        "aggregated collection"
    );
    Ok(rows)
}

/// Aggregate already-parsed reports.
///
/// Rows are sorted by entry name, then target.
pub fn aggregate_reports(
    reports: &[MeasurementReport],
    options: &AggregateOptions,
) -> CoreResult<Vec<AggregatedRow>> {
    let mut samples: HashMap<GroupKey, Vec<f64>> = HashMap::new();

    for report in reports {
        for (name, total) in run_totals(report, options) {
            let key = GroupKey::new(report.target(), &name)?;
            samples.entry(key).or_default().push(total);
        }
    }

    let mut rows: Vec<AggregatedRow> = samples
        .into_iter()
        .filter_map(|(key, values)| AggregatedRow::from_samples(key, &values))
        .collect();
    rows.sort_by(|a, b| {
        locale_cmp(&a.name, &b.name).then_with(|| locale_cmp(&a.target, &b.target))
    });
    Ok(rows)
}

/// Per-name totals for one run, in first-logged order.
fn run_totals(report: &MeasurementReport, options: &AggregateOptions) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for entry in report.entries(options.kind) {
        if !options.includes(&entry.name) {
            continue;
        }
        match totals.iter_mut().find(|(name, _)| *name == entry.name) {
            Some((_, total)) => *total += entry.value,
            None => totals.push((entry.name, entry.value)),
        }
    }
    totals
}
