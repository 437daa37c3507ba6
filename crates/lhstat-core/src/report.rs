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

//! Parsed Lighthouse reports and the two entry views derived from them.
//!
//! Only the parts of the report schema the aggregator needs are modelled;
//! everything else in the document is ignored during deserialization.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

/// Metric names ending with this suffix are absolute timestamps, not
/// durations, and never take part in aggregation.
pub const TIMESTAMP_SUFFIX: &str = "Ts";

/// Which per-run entries a report contributes to aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryKind {
    /// Raw timing spans from `timing.entries`.
    #[default]
    Timings,
    /// Derived summary metrics from the `metrics` audit.
    Metrics,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timings => write!(f, "timings"),
            Self::Metrics => write!(f, "metrics"),
        }
    }
}

/// One named value logged by a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricEntry {
    /// Entry name (timing span or metric id)
    pub name: String,
    /// Duration or metric value
    pub value: f64,
}

impl MetricEntry {
    /// Create a new entry.
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A single parsed report for one (target, repetition) run.
#[derive(Debug, Clone, Deserialize)]
pub struct MeasurementReport {
    #[serde(rename = "requestedUrl", alias = "requestedTarget")]
    requested_target: String,
    #[serde(default)]
    audits: Audits,
    #[serde(default)]
    timing: Timing,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Audits {
    #[serde(default)]
    metrics: Option<MetricsAudit>,
}

#[derive(Debug, Clone, Deserialize)]
struct MetricsAudit {
    #[serde(default)]
    details: Option<MetricsDetails>,
}

#[derive(Debug, Clone, Deserialize)]
struct MetricsDetails {
    #[serde(default)]
    items: Vec<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Timing {
    #[serde(default)]
    entries: Vec<TimingEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct TimingEntry {
    name: String,
    duration: f64,
}

impl MeasurementReport {
    /// Parse a report from its JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// The target (URL) this run audited.
    pub fn target(&self) -> &str {
        &self.requested_target
    }

    /// Entries of the requested kind, in report order.
    pub fn entries(&self, kind: EntryKind) -> Vec<MetricEntry> {
        match kind {
            EntryKind::Timings => self.timing_entries(),
            EntryKind::Metrics => self.metric_entries(),
        }
    }

    /// Timing spans as logged, duplicates included.
    pub fn timing_entries(&self) -> Vec<MetricEntry> {
        self.timing
            .entries
            .iter()
            .map(|e| MetricEntry::new(e.name.clone(), e.duration))
            .collect()
    }

    /// The first summary-metric item flattened into entries.
    ///
    /// Timestamp-suffixed names and non-numeric values are skipped.
    pub fn metric_entries(&self) -> Vec<MetricEntry> {
        let Some(item) = self
            .audits
            .metrics
            .as_ref()
            .and_then(|audit| audit.details.as_ref())
            .and_then(|details| details.items.first())
        else {
            return Vec::new();
        };

        item.iter()
            .filter(|(name, _)| !name.ends_with(TIMESTAMP_SUFFIX))
            .filter_map(|(name, value)| value.as_f64().map(|v| MetricEntry::new(name.clone(), v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"{
        "requestedUrl": "https://example.com/",
        "finalUrl": "https://example.com/",
        "audits": {
            "metrics": {
                "id": "metrics",
                "details": {
                    "type": "debugdata",
                    "items": [
                        {
                            "firstContentfulPaint": 812,
                            "interactive": 1904.5,
                            "observedNavigationStartTs": 123456789,
                            "lcpInvalidated": false
                        },
                        { "lcpInvalidated": false }
                    ]
                }
            },
            "speed-index": { "score": 1 }
        },
        "timing": {
            "entries": [
                { "name": "lh:init:config", "duration": 10.5, "startTime": 1.0, "entryType": "measure" },
                { "name": "lh:gather:loadPage", "duration": 300, "startTime": 20.0, "entryType": "measure" },
                { "name": "lh:init:config", "duration": 2, "startTime": 400.0, "entryType": "measure" }
            ],
            "total": 412.5
        }
    }"#;

    #[test]
    fn test_parse_target() {
        let report = MeasurementReport::from_json(REPORT).unwrap();
        assert_eq!(report.target(), "https://example.com/");
    }

    #[test]
    fn test_requested_target_alias() {
        let report =
            MeasurementReport::from_json(r#"{"requestedTarget": "https://a.test"}"#).unwrap();
        assert_eq!(report.target(), "https://a.test");
        assert!(report.timing_entries().is_empty());
        assert!(report.metric_entries().is_empty());
    }

    #[test]
    fn test_timing_entries_keep_duplicates_in_order() {
        let report = MeasurementReport::from_json(REPORT).unwrap();
        let entries = report.entries(EntryKind::Timings);
        assert_eq!(
            entries,
            vec![
                MetricEntry::new("lh:init:config", 10.5),
                MetricEntry::new("lh:gather:loadPage", 300.0),
                MetricEntry::new("lh:init:config", 2.0),
            ]
        );
    }

    #[test]
    fn test_metric_entries_skip_timestamps_and_non_numbers() {
        let report = MeasurementReport::from_json(REPORT).unwrap();
        let mut names: Vec<String> = report
            .entries(EntryKind::Metrics)
            .into_iter()
            .map(|e| e.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["firstContentfulPaint", "interactive"]);
    }

    #[test]
    fn test_missing_target_is_an_error() {
        assert!(MeasurementReport::from_json(r#"{"timing": {"entries": []}}"#).is_err());
    }

    #[test]
    fn test_entry_kind_display() {
        assert_eq!(EntryKind::Timings.to_string(), "timings");
        assert_eq!(EntryKind::Metrics.to_string(), "metrics");
    }
}
