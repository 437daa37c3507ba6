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

//! Descriptive statistics over repeated-run samples.
//!
//! # Degenerate Input
//!
//! The standard deviation is the sample (Bessel-corrected) estimate, so a
//! single sample divides by zero and yields `NaN`. That value is passed
//! through to callers unchanged; it describes the input, not a failure.

use std::cmp::Ordering;

/// Summary statistics for one sample set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Number of samples
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (`n - 1` denominator)
    pub stdev: f64,
    /// `stdev / mean` as a percentage
    pub cv: f64,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
}

impl Summary {
    /// Summarize a sample set. Returns `None` for an empty slice.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mean = mean(samples);
        let stdev = sample_stdev(samples, mean);
        Some(Self {
            count: samples.len(),
            mean,
            stdev,
            cv: coefficient_of_variation(stdev, mean),
            min: samples.iter().copied().fold(f64::INFINITY, f64::min),
            max: samples.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    }

    /// Every statistic rounded to one decimal place.
    pub fn rounded(&self) -> Self {
        Self {
            count: self.count,
            mean: round1(self.mean),
            stdev: round1(self.stdev),
            cv: round1(self.cv),
            min: round1(self.min),
            max: round1(self.max),
        }
    }
}

/// Arithmetic mean.
pub fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Sample standard deviation around a precomputed mean.
///
/// `n = 1` divides zero by zero and returns `NaN`.
pub fn sample_stdev(samples: &[f64], mean: f64) -> f64 {
    let squared: f64 = samples.iter().map(|x| (x - mean).powi(2)).sum();
    (squared / (samples.len() as f64 - 1.0)).sqrt()
}

/// Coefficient of variation in percent.
pub fn coefficient_of_variation(stdev: f64, mean: f64) -> f64 {
    stdev / mean * 100.0
}

/// Round to one decimal, halves rounding up on the scaled value.
///
/// `-0.25` becomes `-0.2`, not `-0.3`.
pub fn round1(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// Shortest human form of a number: `15`, `7.1`, `NaN`, `Infinity`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}

/// Percentage form used for the coefficient of variation column.
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_number(value))
}

/// Locale-style string ordering.
///
/// Letters compare case-insensitively first; on a tie lowercase sorts before
/// uppercase at the first differing position, and the raw code points break
/// any remaining tie so the order is total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
    folded(a)
        .cmp(&folded(b))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_samples() {
        let s = Summary::from_samples(&[10.0, 20.0]).unwrap();
        assert_eq!(s.count, 2);
        assert_eq!(s.mean, 15.0);
        assert!((s.stdev - 50f64.sqrt()).abs() < 1e-12);
        assert_eq!(s.min, 10.0);
        assert_eq!(s.max, 20.0);

        let r = s.rounded();
        assert_eq!(r.mean, 15.0);
        assert_eq!(r.stdev, 7.1);
        assert_eq!(r.cv, 47.1);
    }

    #[test]
    fn test_single_sample_stdev_is_nan() {
        let s = Summary::from_samples(&[42.0]).unwrap();
        assert_eq!(s.mean, 42.0);
        assert!(s.stdev.is_nan());
        assert!(s.cv.is_nan());
        assert!(s.rounded().stdev.is_nan());
    }

    #[test]
    fn test_empty_samples() {
        assert!(Summary::from_samples(&[]).is_none());
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round1(0.25), 0.3);
        assert_eq!(round1(-0.25), -0.2);
        assert_eq!(round1(7.07), 7.1);
        assert_eq!(round1(7.04), 7.0);
        assert!(round1(f64::NAN).is_nan());
        assert_eq!(round1(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(15.0), "15");
        assert_eq!(format_number(7.1), "7.1");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-3.5), "-3.5");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_percent(47.1), "47.1%");
    }

    #[test]
    fn test_locale_cmp_case_insensitive_first() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Zebra", "apple"), Ordering::Greater);
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_locale_cmp_prefix() {
        assert_eq!(locale_cmp("lh:init", "lh:init:config"), Ordering::Less);
    }
}
