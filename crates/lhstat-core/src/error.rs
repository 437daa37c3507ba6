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

//! Error types for report loading and aggregation.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the aggregation and comparison engine.
///
/// Any of these terminates the enclosing aggregation call; there is no
/// per-file skip and no partial result.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    /// The collection directory does not exist under the results root.
    #[error("Collection '{name}' not found at '{}'", path.display())]
    CollectionNotFound {
        /// Collection name as requested
        name: String,
        /// Directory that was probed
        path: PathBuf,
    },

    /// Reading a report file or listing a collection failed.
    #[error("I/O error for '{}': {message}", path.display())]
    Io {
        /// The path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// A report exceeds the configured maximum size.
    #[error("Report '{}' is too large ({actual} bytes). Maximum allowed: {max} bytes", path.display())]
    FileTooLarge {
        /// The report path
        path: PathBuf,
        /// Actual size in bytes
        actual: u64,
        /// Configured limit in bytes
        max: u64,
    },

    /// A report file is not a valid report document.
    #[error("Malformed report '{}': {message}", path.display())]
    MalformedReport {
        /// The report path
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// A target or entry name contains the reserved unit separator.
    #[error("Invalid group key component {0:?}: contains the reserved U+001F character")]
    InvalidKey(String),

    /// A user supplied regular expression failed to compile.
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The pattern source
        pattern: String,
        /// Compiler message
        message: String,
    },
}

impl CoreError {
    /// Create an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a malformed-report error.
    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::MalformedReport {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-pattern error from a regex compile failure.
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: source.to_string(),
        }
    }
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
