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

//! Property-based tests for aggregation and comparison using proptest.
//!
//! - Statistics match their closed-form definitions
//! - Aggregated rows are ordered by name, then target
//! - Comparison is a full outer join
//! - Rows without a delta always sort last
//! - Filtering with no pattern is the identity

use lhstat_core::stats::{locale_cmp, round1};
use lhstat_core::{
    aggregate_reports, compare, filter, AggregateOptions, AggregatedRow, CompareOptions,
    EntryKind, MeasurementReport, StatField,
};
use proptest::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeSet;

// ===== Generators =====

fn target() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "https://a.test".to_string(),
        "https://b.test".to_string(),
        "https://c.test".to_string(),
    ])
}

fn entry_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z][a-zA-Z:]{0,8}").expect("valid entry name regex")
}

fn duration() -> impl Strategy<Value = f64> {
    (0u32..100_000).prop_map(|n| f64::from(n) / 10.0)
}

fn run() -> impl Strategy<Value = (String, Vec<(String, f64)>)> {
    (target(), prop::collection::vec((entry_name(), duration()), 0..6))
}

fn to_report(target: &str, entries: &[(String, f64)]) -> MeasurementReport {
    let entries: Vec<String> = entries
        .iter()
        .map(|(name, d)| format!(r#"{{"name": "{name}", "duration": {d}}}"#))
        .collect();
    MeasurementReport::from_json(&format!(
        r#"{{"requestedUrl": "{target}", "timing": {{"entries": [{}]}}}}"#,
        entries.join(",")
    ))
    .expect("generated report parses")
}

fn rows_from(runs: &[(String, Vec<(String, f64)>)]) -> Vec<AggregatedRow> {
    let reports: Vec<MeasurementReport> = runs.iter().map(|(t, e)| to_report(t, e)).collect();
    aggregate_reports(&reports, &AggregateOptions::new(EntryKind::Timings))
        .expect("aggregation succeeds")
}

// ===== Properties =====

proptest! {
    #[test]
    fn prop_statistics_match_definitions(samples in prop::collection::vec(duration(), 1..12)) {
        let runs: Vec<(String, Vec<(String, f64)>)> = samples
            .iter()
            .map(|&d| ("https://a.test".to_string(), vec![("x".to_string(), d)]))
            .collect();
        let rows = rows_from(&runs);
        prop_assert_eq!(rows.len(), 1);
        let row = &rows[0];

        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        prop_assert_eq!(row.sample_count, samples.len());
        prop_assert_eq!(row.mean, round1(mean));
        prop_assert_eq!(row.min, round1(samples.iter().copied().fold(f64::INFINITY, f64::min)));
        prop_assert_eq!(row.max, round1(samples.iter().copied().fold(f64::NEG_INFINITY, f64::max)));

        if samples.len() >= 2 {
            let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
            prop_assert_eq!(row.stdev, round1(var.sqrt()));
        } else {
            prop_assert!(row.stdev.is_nan());
        }
    }

    #[test]
    fn prop_rows_sorted_by_name_then_target(runs in prop::collection::vec(run(), 0..8)) {
        let rows = rows_from(&runs);
        for pair in rows.windows(2) {
            let order = locale_cmp(&pair[0].name, &pair[1].name)
                .then_with(|| locale_cmp(&pair[0].target, &pair[1].target));
            prop_assert_eq!(order, Ordering::Less);
        }
    }

    #[test]
    fn prop_sample_count_is_number_of_runs(runs in prop::collection::vec(run(), 1..8)) {
        let rows = rows_from(&runs);
        for row in &rows {
            let expected = runs
                .iter()
                .filter(|(t, entries)| *t == row.target && entries.iter().any(|(n, _)| *n == row.name))
                .count();
            prop_assert_eq!(row.sample_count, expected);
        }
    }

    #[test]
    fn prop_compare_is_outer_join(
        base_runs in prop::collection::vec(run(), 0..6),
        other_runs in prop::collection::vec(run(), 0..6),
    ) {
        let base = rows_from(&base_runs);
        let other = rows_from(&other_runs);
        let joined = compare(&base, &other, &CompareOptions::default());

        let expected: BTreeSet<_> = base.iter().chain(other.iter()).map(|r| r.key.clone()).collect();
        let actual: BTreeSet<_> = joined.iter().map(|r| r.key.clone()).collect();
        prop_assert_eq!(joined.len(), actual.len());
        prop_assert_eq!(actual, expected);

        for row in &joined {
            let in_base = base.iter().any(|r| r.key == row.key);
            let in_other = other.iter().any(|r| r.key == row.key);
            prop_assert_eq!(row.delta(StatField::Mean).is_some(), in_base && in_other);
        }
    }

    #[test]
    fn prop_missing_deltas_sort_last(
        base_runs in prop::collection::vec(run(), 0..6),
        other_runs in prop::collection::vec(run(), 0..6),
        descending in any::<bool>(),
    ) {
        let base = rows_from(&base_runs);
        let other = rows_from(&other_runs);
        let options = CompareOptions { sort_field: StatField::Mean, descending };
        let joined = compare(&base, &other, &options);

        let first_missing = joined
            .iter()
            .position(|r| r.delta(StatField::Mean).is_none())
            .unwrap_or(joined.len());
        prop_assert!(joined[first_missing..].iter().all(|r| r.delta(StatField::Mean).is_none()));

        let magnitudes: Vec<f64> = joined[..first_missing]
            .iter()
            .filter_map(|r| r.delta(StatField::Mean))
            .map(f64::abs)
            .collect();
        for pair in magnitudes.windows(2) {
            if descending {
                prop_assert!(pair[0] >= pair[1]);
            } else {
                prop_assert!(pair[0] <= pair[1]);
            }
        }
    }

    #[test]
    fn prop_filter_without_pattern_is_identity(runs in prop::collection::vec(run(), 0..6)) {
        let original: Vec<_> = rows_from(&runs).iter().map(|r| r.to_record()).collect();
        let mut filtered = original.clone();
        filter(&mut filtered, None);
        // Debug form, since single-run rows carry NaN and NaN != NaN.
        prop_assert_eq!(format!("{filtered:?}"), format!("{original:?}"));
    }
}
