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

//! Comparison of two aggregated collections.
//!
//! The join is a full outer join on [`GroupKey`]: a key present on only one
//! side still produces a row, with `N/A` standing in for the missing values
//! and no delta.

use crate::aggregate::{AggregatedRow, StatField};
use crate::key::GroupKey;
use crate::record::{FieldValue, Record};
use crate::stats::round1;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Placeholder for a value missing on one side of the join.
pub const NOT_AVAILABLE: &str = "N/A";

/// Sort policy for comparison output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompareOptions {
    /// Statistic whose delta orders the rows
    pub sort_field: StatField,
    /// Largest absolute delta first
    pub descending: bool,
}

/// One statistic on both sides of the join.
#[derive(Debug, Clone, PartialEq)]
pub struct StatDelta {
    /// Which statistic
    pub field: StatField,
    /// Base-side value
    pub base: Option<f64>,
    /// Other-side value
    pub other: Option<f64>,
    /// `other - base`, present only when both sides exist
    pub delta: Option<f64>,
}

impl StatDelta {
    fn new(field: StatField, base: Option<f64>, other: Option<f64>) -> Self {
        let delta = match (base, other) {
            (Some(b), Some(o)) => Some(round1(o - b)),
            _ => None,
        };
        Self {
            field,
            base,
            other,
            delta,
        }
    }

    /// `"<base> -> <other>"`, with `N/A` for a missing side.
    pub fn description(&self) -> String {
        let side = |value: Option<f64>| match value {
            Some(v) => self.field.format(v),
            None => NOT_AVAILABLE.to_string(),
        };
        format!("{} -> {}", side(self.base), side(self.other))
    }
}

/// A joined row.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    /// Join key
    pub key: GroupKey,
    /// Entry name
    pub name: String,
    /// Audited target
    pub target: String,
    /// One entry per [`StatField::ALL`], in that order
    pub stats: Vec<StatDelta>,
}

impl ComparisonRow {
    fn join(key: &GroupKey, base: Option<&AggregatedRow>, other: Option<&AggregatedRow>) -> Self {
        let (target, name) = key.split();
        let stats = StatField::ALL
            .iter()
            .map(|&field| {
                StatDelta::new(
                    field,
                    base.map(|row| row.stat(field)),
                    other.map(|row| row.stat(field)),
                )
            })
            .collect();
        Self {
            key: key.clone(),
            name: name.to_string(),
            target: target.to_string(),
            stats,
        }
    }

    /// The joined values of one statistic.
    pub fn stat(&self, field: StatField) -> Option<&StatDelta> {
        self.stats.iter().find(|s| s.field == field)
    }

    /// The delta of one statistic, if both sides exist.
    pub fn delta(&self, field: StatField) -> Option<f64> {
        self.stat(field).and_then(|s| s.delta)
    }

    // Non-finite deltas cannot be ordered by magnitude and sort with the
    // missing ones.
    fn sort_key(&self, field: StatField) -> Option<f64> {
        self.delta(field).filter(|d| d.is_finite()).map(f64::abs)
    }

    /// Presentation form: `name, target`, then each statistic's
    /// description followed by its delta column.
    pub fn to_record(&self) -> Record {
        let mut record = Record::new()
            .with("name", self.name.as_str())
            .with("target", self.target.as_str());
        for stat in &self.stats {
            record.insert(stat.field.column(), Some(FieldValue::Text(stat.description())));
            record.insert(stat.field.delta_column(), stat.delta.map(FieldValue::Number));
        }
        record
    }
}

/// Outer-join two aggregated row sets and order by delta magnitude.
///
/// Rows without a finite delta for `options.sort_field` always come last,
/// whatever the direction. The sort is stable; before sorting, rows follow
/// base order and then other-only keys in other order.
pub fn compare(
    base: &[AggregatedRow],
    other: &[AggregatedRow],
    options: &CompareOptions,
) -> Vec<ComparisonRow> {
    let base_by_key: HashMap<&GroupKey, &AggregatedRow> =
        base.iter().map(|row| (&row.key, row)).collect();
    let other_by_key: HashMap<&GroupKey, &AggregatedRow> =
        other.iter().map(|row| (&row.key, row)).collect();

    let mut seen: HashSet<&GroupKey> = HashSet::new();
    let mut rows: Vec<ComparisonRow> = base
        .iter()
        .chain(other.iter())
        .filter(|&row| seen.insert(&row.key))
        .map(|row| {
            ComparisonRow::join(
                &row.key,
                base_by_key.get(&row.key).copied(),
                other_by_key.get(&row.key).copied(),
            )
        })
        .collect();

    let field = options.sort_field;
    rows.sort_by(|a, b| match (a.sort_key(field), b.sort_key(field)) {
        (Some(x), Some(y)) => {
            let order = x.total_cmp(&y);
            if options.descending {
                order.reverse()
            } else {
                order
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(target: &str, name: &str, mean: f64) -> AggregatedRow {
        AggregatedRow {
            key: GroupKey::new(target, name).unwrap(),
            name: name.to_string(),
            target: target.to_string(),
            sample_count: 2,
            mean,
            stdev: 1.0,
            coefficient_of_variation: 10.0,
            min: mean - 1.0,
            max: mean + 1.0,
        }
    }

    fn names(rows: &[ComparisonRow]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_matching_key() {
        let base = vec![row("https://a.test", "connect", 15.0)];
        let other = vec![row("https://a.test", "connect", 20.0)];
        let rows = compare(&base, &other, &CompareOptions::default());
        assert_eq!(rows.len(), 1);
        let mean = rows[0].stat(StatField::Mean).unwrap();
        assert_eq!(mean.description(), "15 -> 20");
        assert_eq!(mean.delta, Some(5.0));
        assert_eq!(rows[0].delta(StatField::Stdev), Some(0.0));
    }

    #[test]
    fn test_other_only_key() {
        let other = vec![row("https://a.test", "dns", 8.0)];
        let rows = compare(&[], &other, &CompareOptions::default());
        let mean = rows[0].stat(StatField::Mean).unwrap();
        assert_eq!(mean.description(), "N/A -> 8");
        assert_eq!(mean.delta, None);
    }

    #[test]
    fn test_base_only_key() {
        let base = vec![row("https://a.test", "dns", 8.0)];
        let rows = compare(&base, &[], &CompareOptions::default());
        assert_eq!(
            rows[0].stat(StatField::Cv).unwrap().description(),
            "10% -> N/A"
        );
        assert!(rows[0].stats.iter().all(|s| s.delta.is_none()));
    }

    #[test]
    fn test_outer_join_key_set() {
        let base = vec![
            row("https://a.test", "a", 1.0),
            row("https://a.test", "b", 1.0),
        ];
        let other = vec![
            row("https://a.test", "b", 2.0),
            row("https://a.test", "c", 3.0),
        ];
        let rows = compare(&base, &other, &CompareOptions::default());
        let mut keys = names(&rows);
        keys.sort();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_ascending_by_absolute_delta() {
        let base = vec![
            row("t", "big", 10.0),
            row("t", "small", 10.0),
            row("t", "negative", 10.0),
            row("t", "gone", 10.0),
        ];
        let other = vec![
            row("t", "big", 40.0),
            row("t", "small", 11.0),
            row("t", "negative", 0.0),
        ];
        let rows = compare(&base, &other, &CompareOptions::default());
        assert_eq!(names(&rows), vec!["small", "negative", "big", "gone"]);
    }

    #[test]
    fn test_sort_descending_keeps_missing_last() {
        let base = vec![row("t", "big", 10.0), row("t", "small", 10.0)];
        let other = vec![
            row("t", "new", 5.0),
            row("t", "big", 40.0),
            row("t", "small", 11.0),
        ];
        let options = CompareOptions {
            sort_field: StatField::Mean,
            descending: true,
        };
        let rows = compare(&base, &other, &options);
        assert_eq!(names(&rows), vec!["big", "small", "new"]);
    }

    #[test]
    fn test_sort_by_other_field() {
        let mut wide = row("t", "wide", 10.0);
        wide.max = 100.0;
        let base = vec![row("t", "wide", 10.0), row("t", "narrow", 10.0)];
        let other = vec![wide, row("t", "narrow", 12.0)];
        let options = CompareOptions {
            sort_field: StatField::Max,
            descending: true,
        };
        let rows = compare(&base, &other, &options);
        assert_eq!(names(&rows), vec!["wide", "narrow"]);
    }

    #[test]
    fn test_nan_delta_sorts_with_missing() {
        let mut single = row("t", "single", 10.0);
        single.stdev = f64::NAN;
        let base = vec![single.clone(), row("t", "pair", 10.0)];
        let other = vec![single, row("t", "pair", 10.0)];
        let options = CompareOptions {
            sort_field: StatField::Stdev,
            descending: false,
        };
        let rows = compare(&base, &other, &options);
        assert_eq!(names(&rows), vec!["pair", "single"]);
        assert!(rows[1].delta(StatField::Stdev).unwrap().is_nan());
    }

    #[test]
    fn test_delta_is_rounded() {
        let mut a = row("t", "x", 7.0);
        a.stdev = 7.0;
        let mut b = row("t", "x", 7.1);
        b.stdev = 7.1;
        let rows = compare(&[a], &[b], &CompareOptions::default());
        assert_eq!(rows[0].delta(StatField::Mean), Some(0.1));
    }

    #[test]
    fn test_record_layout() {
        let other = vec![row("https://a.test", "dns", 8.0)];
        let record = compare(&[], &other, &CompareOptions::default())[0].to_record();
        assert_eq!(
            record.names().collect::<Vec<_>>(),
            vec![
                "name", "target", "mean", "mean Δ", "stdev", "stdev Δ", "CV", "CV Δ", "min",
                "min Δ", "max", "max Δ"
            ]
        );
        assert_eq!(record.get("mean"), Some(&FieldValue::from("N/A -> 8")));
        assert!(record.contains("mean Δ"));
        assert_eq!(record.get("mean Δ"), None);
    }
}
