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

//! Aggregation commands: summarize one collection, compare two.

use crate::commands;
use crate::error::CliError;
use crate::present::OutputFormat;
use clap::{Args, Subcommand, ValueEnum};
use lhstat_core::{AggregateOptions, CompareOptions, EntryKind, FieldFilter, StatField, DEFAULT_EXCLUDE};
use std::path::Path;

/// Entry kind selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Raw timing spans (`timing.entries`)
    Timings,
    /// Summary metrics (`audits.metrics`)
    Metrics,
}

impl From<KindArg> for EntryKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Timings => EntryKind::Timings,
            KindArg::Metrics => EntryKind::Metrics,
        }
    }
}

/// Statistic whose delta orders comparison rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// Change in the mean
    Mean,
    /// Change in the standard deviation
    Stdev,
    /// Change in the coefficient of variation
    Cv,
    /// Change in the minimum
    Min,
    /// Change in the maximum
    Max,
}

impl From<SortArg> for StatField {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Mean => StatField::Mean,
            SortArg::Stdev => StatField::Stdev,
            SortArg::Cv => StatField::Cv,
            SortArg::Min => StatField::Min,
            SortArg::Max => StatField::Max,
        }
    }
}

/// Options shared by `summarize` and `compare`.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Entries to aggregate
    #[arg(short, long, value_enum, default_value_t = KindArg::Timings)]
    pub kind: KindArg,

    /// Only aggregate entries whose name matches (case-insensitive regex)
    #[arg(short, long, value_name = "REGEX")]
    pub include: Option<String>,

    /// Hide columns whose name matches (case-insensitive regex)
    #[arg(short, long, value_name = "REGEX", default_value = DEFAULT_EXCLUDE)]
    pub exclude: String,

    /// Show every column
    #[arg(long, conflicts_with = "exclude")]
    pub no_exclude: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl QueryArgs {
    /// Aggregation options from the kind and inclusion pattern.
    pub fn aggregate_options(&self) -> Result<AggregateOptions, CliError> {
        let options = AggregateOptions::new(self.kind.into());
        Ok(match &self.include {
            Some(pattern) => options.with_include(pattern)?,
            None => options,
        })
    }

    /// Column filter from the exclusion settings.
    pub fn field_filter(&self) -> Result<FieldFilter, CliError> {
        let pattern = (!self.no_exclude).then_some(self.exclude.as_str());
        Ok(FieldFilter::new(pattern)?)
    }

    /// Requested output format.
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_json_flag(self.json)
    }
}

/// Core aggregation commands.
#[derive(Subcommand)]
pub enum CoreCommands {
    /// Summarize one collection
    ///
    /// Groups every run's entries by (target, name) and prints n, mean,
    /// stdev, CV, min and max per group. min, max, stdev and n are hidden
    /// by default; pass --no-exclude to show them.
    Summarize {
        /// Collection name
        #[arg(value_name = "COLLECTION")]
        collection: String,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Compare two collections
    ///
    /// Outer-joins the summaries of BASE and OTHER and prints "base -> other"
    /// with the delta for every statistic. Rows are ordered by the absolute
    /// delta of --sort; rows missing from either side come last.
    Compare {
        /// Baseline collection
        #[arg(value_name = "BASE")]
        base: String,

        /// Collection compared against the baseline
        #[arg(value_name = "OTHER")]
        other: String,

        /// Statistic whose delta orders the rows
        #[arg(short, long, value_enum, default_value_t = SortArg::Mean)]
        sort: SortArg,

        /// Largest deltas first
        #[arg(long)]
        desc: bool,

        #[command(flatten)]
        query: QueryArgs,
    },
}

impl CoreCommands {
    /// Execute the core command.
    pub fn execute(self, results_dir: &Path) -> Result<(), CliError> {
        let store = commands::open_store(results_dir);
        match self {
            CoreCommands::Summarize { collection, query } => commands::summarize(
                &store,
                &collection,
                &query.aggregate_options()?,
                &query.field_filter()?,
                query.output_format(),
            ),
            CoreCommands::Compare {
                base,
                other,
                sort,
                desc,
                query,
            } => commands::compare(
                &store,
                &base,
                &other,
                &query.aggregate_options()?,
                &CompareOptions {
                    sort_field: sort.into(),
                    descending: desc,
                },
                &query.field_filter()?,
                query.output_format(),
            ),
        }
    }
}
