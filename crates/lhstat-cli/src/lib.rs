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

//! lhstat CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **summarize**: per-(target, entry) statistics for one collection
//! - **compare**: outer-joined deltas between two collections
//! - **collect**: run Lighthouse repeatedly into a new collection
//! - **completion**: shell completion scripts
//!
//! # Configuration
//!
//! - `--results-dir` / `LHSTAT_RESULTS_DIR`: results root (default `lhstat-results`)
//! - `LHSTAT_MAX_FILE_SIZE`: largest report accepted, in bytes (default 1 GB)
//! - `RUST_LOG`: log filter, `-v` raises the default to `debug`
//!
//! # Examples
//!
//! ```no_run
//! use lhstat_cli::commands::{compare, open_store};
//! use lhstat_cli::present::OutputFormat;
//! use lhstat_core::{AggregateOptions, CompareOptions, EntryKind, FieldFilter, StatField};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), lhstat_cli::error::CliError> {
//! let store = open_store(Path::new("lhstat-results"));
//! compare(
//!     &store,
//!     "before",
//!     "after",
//!     &AggregateOptions::new(EntryKind::Metrics),
//!     &CompareOptions { sort_field: StatField::Mean, descending: true },
//!     &FieldFilter::with_default_exclusions(),
//!     OutputFormat::Json,
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod present;
