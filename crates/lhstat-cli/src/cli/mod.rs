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

//! CLI command definitions and argument parsing.
//!
//! Commands are organized into two groups, flattened so that every command
//! appears at the top level:
//!
//! ```text
//! Commands
//! ├── Core (summarize, compare)
//! └── Utility (collect, completion)
//! ```

mod core;
mod utility;

use crate::commands::DEFAULT_RESULTS_DIR;
use crate::error::CliError;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

pub use self::core::{CoreCommands, KindArg, QueryArgs, SortArg};
pub use utility::UtilityCommands;

/// lhstat - aggregate and compare repeated Lighthouse runs
///
/// # Examples
///
/// ```bash
/// # Audit two pages five times each
/// lhstat collect before https://example.com https://example.com/pricing --runs 5
///
/// # Summary metrics of one collection
/// lhstat summarize before --kind metrics
///
/// # Largest mean changes first
/// lhstat compare before after --kind metrics --desc
/// ```
#[derive(Parser)]
#[command(name = "lhstat")]
#[command(author, version, about = "lhstat - aggregate and compare repeated Lighthouse runs", long_about = None)]
pub struct Cli {
    /// Directory holding one sub-directory per collection
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        env = "LHSTAT_RESULTS_DIR",
        default_value = DEFAULT_RESULTS_DIR
    )]
    pub results_dir: PathBuf,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands enum.
#[derive(Subcommand)]
pub enum Commands {
    // Core commands - flattened to appear at top level
    #[command(flatten)]
    Core(CoreCommands),

    // Utility commands - flattened to appear at top level
    #[command(flatten)]
    Utility(UtilityCommands),
}

impl Commands {
    /// Execute the command against the given results root.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a collection is missing or malformed, a pattern
    /// does not compile, collecting fails, or output cannot be written.
    pub fn execute(self, results_dir: &Path) -> Result<(), CliError> {
        match self {
            Commands::Core(cmd) => cmd.execute(results_dir),
            Commands::Utility(cmd) => cmd.execute(results_dir),
        }
    }
}
