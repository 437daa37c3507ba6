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

//! Column filter applied to result rows before presentation.

use crate::error::{CoreError, CoreResult};
use crate::record::Record;
use regex::{Regex, RegexBuilder};
use tracing::warn;

/// Columns hidden unless the caller configures otherwise.
pub const DEFAULT_EXCLUDE: &str = "^(min|max|stdev|n)$";

/// Compile a user pattern with case-insensitive matching.
pub fn compile_pattern(pattern: &str) -> CoreResult<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| CoreError::invalid_pattern(pattern, e))
}

/// Remove every field whose name matches `exclude` from every row.
///
/// With no pattern the rows are left untouched.
pub fn filter(rows: &mut [Record], exclude: Option<&Regex>) {
    let Some(exclude) = exclude else {
        return;
    };
    for row in rows.iter_mut() {
        row.retain(|name| !exclude.is_match(name));
    }
}

/// A compiled exclusion setting.
#[derive(Debug, Clone, Default)]
pub struct FieldFilter {
    exclude: Option<Regex>,
}

impl FieldFilter {
    /// Exclude columns matching `pattern`, or nothing if `None`.
    pub fn new(pattern: Option<&str>) -> CoreResult<Self> {
        Ok(Self {
            exclude: pattern.map(compile_pattern).transpose()?,
        })
    }

    /// The [`DEFAULT_EXCLUDE`] filter.
    pub fn with_default_exclusions() -> Self {
        Self {
            exclude: compile_pattern(DEFAULT_EXCLUDE)
                .map_err(|e| warn!(error = %e, "default exclusion pattern rejected"))
                .ok(),
        }
    }

    /// The compiled pattern, if any.
    pub fn pattern(&self) -> Option<&Regex> {
        self.exclude.as_ref()
    }

    /// Apply to a row set in place.
    pub fn apply(&self, rows: &mut [Record]) {
        filter(rows, self.exclude.as_ref());
    }
}
