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

//! Structured error types for the lhstat CLI.
//!
//! All command functions return `Result<T, CliError>`; engine failures are
//! wrapped unchanged so their messages reach the user as-is.

use lhstat_core::CoreError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for lhstat CLI operations.
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// Aggregation or comparison failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// I/O operation failed (directory creation, output write).
    #[error("I/O error for '{}': {message}", path.display())]
    Io {
        /// The path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// JSON rendering failed.
    #[error("JSON format error: {message}")]
    JsonFormat {
        /// The error message
        message: String,
    },

    /// The collection directory for a new collection already exists.
    ///
    /// Collecting never writes into an existing collection.
    #[error("Collection '{name}' already exists at '{}'", path.display())]
    CollectionExists {
        /// Collection name
        name: String,
        /// Existing directory
        path: PathBuf,
    },

    /// The external auditing program could not be run or exited non-zero.
    #[error("Collector '{program}' failed for {url} (run {run}): {message}")]
    CollectorFailed {
        /// Program that was invoked
        program: String,
        /// Target URL
        url: String,
        /// 1-based repetition number
        run: usize,
        /// Exit status or spawn error
        message: String,
    },

    /// Invalid input provided by the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(source: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: source.to_string(),
        }
    }
}
