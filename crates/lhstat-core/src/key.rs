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

//! Composite (target, entry name) grouping key.

use crate::error::{CoreError, CoreResult};
use std::fmt;

/// Separator between the target and entry name inside an encoded key.
pub const KEY_SEPARATOR: &str = "\u{1f}@@\u{1f}";

/// Control character that opens and closes [`KEY_SEPARATOR`].
///
/// Neither component may contain it, so the separator can only occur at the
/// join point and [`GroupKey::split`] stays lossless.
const RESERVED: char = '\u{1f}';

/// Identifies one sample set: all runs of one entry on one target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey(String);

impl GroupKey {
    /// Encode a key from its two components.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidKey`] if either component contains the
    /// `U+001F` unit separator used by [`KEY_SEPARATOR`].
    pub fn new(target: &str, name: &str) -> CoreResult<Self> {
        for part in [target, name] {
            if part.contains(RESERVED) {
                return Err(CoreError::InvalidKey(part.to_string()));
            }
        }
        Ok(Self(format!("{target}{KEY_SEPARATOR}{name}")))
    }

    /// Decode back into `(target, name)`.
    pub fn split(&self) -> (&str, &str) {
        self.0
            .split_once(KEY_SEPARATOR)
            .unwrap_or((self.0.as_str(), ""))
    }

    /// The target component.
    pub fn target(&self) -> &str {
        self.split().0
    }

    /// The entry name component.
    pub fn name(&self) -> &str {
        self.split().1
    }

    /// The encoded form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (target, name) = self.split();
        write!(f, "{name} @ {target}")
    }
}
