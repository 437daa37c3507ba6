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

//! Aggregation and comparison engine for repeated Lighthouse runs.
//!
//! A *collection* is a directory of JSON reports, one per (target × run).
//! This crate reads a collection, groups per-run entries by
//! (target, entry name), summarizes each group across runs, and compares
//! two such summaries against each other.
//!
//! # Pipeline
//!
//! ```text
//! ReportStore ──► aggregate ──► Record ──► filter ──► presenter
//!                    │
//! ReportStore ──► aggregate ──► compare ──► Record ──► filter ──► presenter
//! ```
//!
//! The presenter lives in `lhstat-cli`; this crate stops at [`Record`]s.
//!
//! # Example
//!
//! ```no_run
//! use lhstat_core::{
//!     aggregate, compare, AggregateOptions, CompareOptions, EntryKind, FieldFilter, ReportStore,
//! };
//!
//! # fn main() -> Result<(), lhstat_core::CoreError> {
//! let store = ReportStore::new("lhstat-results");
//! let options = AggregateOptions::new(EntryKind::Metrics);
//!
//! let base = aggregate(&store, "before", &options)?;
//! let other = aggregate(&store, "after", &options)?;
//!
//! let mut rows: Vec<_> = compare(&base, &other, &CompareOptions::default())
//!     .iter()
//!     .map(|row| row.to_record())
//!     .collect();
//! FieldFilter::with_default_exclusions().apply(&mut rows);
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! Everything here is synchronous. Grouping state is local to each call, so
//! calls against different collections are independent.

pub mod aggregate;
pub mod compare;
mod error;
pub mod filter;
mod key;
pub mod record;
pub mod report;
pub mod stats;
pub mod store;

pub use aggregate::{aggregate, aggregate_reports, AggregateOptions, AggregatedRow, StatField};
pub use compare::{compare, CompareOptions, ComparisonRow, StatDelta};
pub use error::{CoreError, CoreResult};
pub use filter::{filter, FieldFilter, DEFAULT_EXCLUDE};
pub use key::{GroupKey, KEY_SEPARATOR};
pub use record::{FieldValue, Record};
pub use report::{EntryKind, MeasurementReport, MetricEntry};
pub use store::ReportStore;
