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

//! CLI command implementations

mod collect;
mod compare;
mod completion;
mod summarize;

pub use collect::{collect, collect_with, slug, CollectConfig, Invocation};
pub use compare::{compare, compare_rows};
pub use completion::{generate_completion_for_command, print_installation_instructions};
pub use summarize::{summarize, summarize_rows};

use crate::error::CliError;
use lhstat_core::store::DEFAULT_MAX_FILE_SIZE;
use lhstat_core::ReportStore;
use std::io::{self, Write};
use std::path::Path;

/// Results root used when neither `--results-dir` nor `LHSTAT_RESULTS_DIR`
/// is given.
pub const DEFAULT_RESULTS_DIR: &str = "lhstat-results";

/// Get the maximum report size from the environment or use the default.
///
/// Reads `LHSTAT_MAX_FILE_SIZE` (bytes). Falls back to
/// [`DEFAULT_MAX_FILE_SIZE`] if unset or unparsable.
fn get_max_file_size() -> u64 {
    std::env::var("LHSTAT_MAX_FILE_SIZE")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Open the report store rooted at `results_dir`.
pub fn open_store(results_dir: &Path) -> ReportStore {
    ReportStore::new(results_dir).with_max_file_size(get_max_file_size())
}

/// Write rendered output to stdout.
pub fn write_output(content: &str) -> Result<(), CliError> {
    io::stdout()
        .write_all(content.as_bytes())
        .map_err(|e| CliError::io_error("<stdout>", e))
}
