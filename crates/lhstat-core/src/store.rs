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

//! Report store - one directory per collection, one JSON report per run.
//!
//! A collection named `nightly` under the results root `runs/` is the
//! directory `runs/nightly/`; every `*.json` file directly inside it is one
//! report. Files are returned in file-name order so that sample arrival
//! order is reproducible across calls.

use crate::error::{CoreError, CoreResult};
use crate::report::MeasurementReport;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default maximum report size (1 GB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Read-only view of a results root directory.
#[derive(Debug, Clone)]
pub struct ReportStore {
    root: PathBuf,
    max_file_size: u64,
}

impl ReportStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Override the maximum size of a single report file.
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// The results root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the reports of `collection`.
    pub fn collection_dir(&self, collection: &str) -> PathBuf {
        self.root.join(collection)
    }

    /// List the report files of a collection, sorted by file name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CollectionNotFound`] if the collection directory
    /// does not exist, or [`CoreError::Io`] if it cannot be listed.
    pub fn report_paths(&self, collection: &str) -> CoreResult<Vec<PathBuf>> {
        let dir = self.collection_dir(collection);
        if !dir.is_dir() {
            return Err(CoreError::CollectionNotFound {
                name: collection.to_string(),
                path: dir,
            });
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&dir).map_err(|e| CoreError::io_error(&dir, e))? {
            let path = entry.map_err(|e| CoreError::io_error(&dir, e))?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    /// Parse every report of a collection.
    ///
    /// Fails on the first report that cannot be read or parsed; no partial
    /// result is returned.
    pub fn load(&self, collection: &str) -> CoreResult<Vec<MeasurementReport>> {
        let paths = self.report_paths(collection)?;
        debug!(collection, reports = paths.len(), "loading collection");
        paths.iter().map(|path| self.read_report(path)).collect()
    }

    /// Read and parse a single report file.
    pub fn read_report(&self, path: &Path) -> CoreResult<MeasurementReport> {
        let metadata = fs::metadata(path).map_err(|e| CoreError::io_error(path, e))?;
        if metadata.len() > self.max_file_size {
            return Err(CoreError::FileTooLarge {
                path: path.to_path_buf(),
                actual: metadata.len(),
                max: self.max_file_size,
            });
        }

        let text = fs::read_to_string(path).map_err(|e| CoreError::io_error(path, e))?;
        MeasurementReport::from_json(&text).map_err(|e| CoreError::malformed(path, e.to_string()))
    }
}
