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

//! Collect command - run the auditing tool repeatedly into a new collection.
//!
//! Runs are strictly sequential: each invocation is awaited before the next
//! one starts, so runs never compete for CPU or network. A failed run stops
//! the collection; nothing is retried.

use crate::error::CliError;
use colored::Colorize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Settings for one collection step.
#[derive(Debug, Clone)]
pub struct CollectConfig {
    /// Name of the collection to create
    pub collection: String,
    /// Targets to audit
    pub urls: Vec<String>,
    /// Repetitions per target
    pub runs: usize,
    /// Auditing program (defaults to `lighthouse`)
    pub program: String,
    /// Extra arguments passed through to every invocation
    pub extra_args: Vec<String>,
}

/// A single planned run of the auditing program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Target URL
    pub url: String,
    /// 1-based repetition number
    pub run: usize,
    /// Where the JSON report is written
    pub output_path: PathBuf,
    /// Full argument list, URL first
    pub args: Vec<String>,
}

/// File-system safe form of a URL: runs of non-alphanumerics become `_`.
///
/// ```
/// use lhstat_cli::commands::slug;
///
/// assert_eq!(slug("https://example.com/a?b=1"), "https_example_com_a_b_1");
/// ```
pub fn slug(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}

impl CollectConfig {
    /// Every invocation in execution order: run 1 for all URLs, then run 2.
    pub fn plan(&self, dir: &Path) -> Vec<Invocation> {
        let mut plan = Vec::with_capacity(self.runs * self.urls.len());
        for run in 1..=self.runs {
            for url in &self.urls {
                let output_path = dir.join(format!("{}-{run}.report.json", slug(url)));
                let mut args = vec![
                    url.clone(),
                    "--output=json".to_string(),
                    format!("--output-path={}", output_path.display()),
                    "--quiet".to_string(),
                    "--chrome-flags=--headless".to_string(),
                ];
                args.extend(self.extra_args.iter().cloned());
                plan.push(Invocation {
                    url: url.clone(),
                    run,
                    output_path,
                    args,
                });
            }
        }
        plan
    }

    fn validate(&self) -> Result<(), CliError> {
        if self.runs == 0 {
            return Err(CliError::invalid_input("--runs must be at least 1"));
        }
        if self.urls.is_empty() {
            return Err(CliError::invalid_input("at least one URL is required"));
        }
        if self.collection.is_empty()
            || self.collection.contains(&['/', '\\'][..])
            || self.collection == "."
            || self.collection == ".."
        {
            return Err(CliError::invalid_input(format!(
                "invalid collection name '{}'",
                self.collection
            )));
        }

        let mut slugs: HashMap<String, &str> = HashMap::new();
        for url in &self.urls {
            if let Some(previous) = slugs.insert(slug(url), url) {
                return Err(CliError::invalid_input(format!(
                    "'{}' and '{}' map to the same report file name",
                    previous, url
                )));
            }
        }
        Ok(())
    }
}

/// Collect with the configured auditing program.
pub fn collect(results_dir: &Path, config: &CollectConfig) -> Result<(), CliError> {
    collect_with(results_dir, config, |invocation| {
        run_program(&config.program, invocation)
    })
}

/// Collect, executing each planned invocation with `runner`.
///
/// The collection directory must not exist yet; it is created before the
/// first run.
pub fn collect_with<F>(results_dir: &Path, config: &CollectConfig, mut runner: F) -> Result<(), CliError>
where
    F: FnMut(&Invocation) -> Result<(), CliError>,
{
    config.validate()?;

    let dir = results_dir.join(&config.collection);
    if dir.exists() {
        return Err(CliError::CollectionExists {
            name: config.collection.clone(),
            path: dir,
        });
    }
    fs::create_dir_all(&dir).map_err(|e| CliError::io_error(&dir, e))?;

    let plan = config.plan(&dir);
    let total = plan.len();
    info!(collection = %config.collection, total, "starting collection");

    for (i, invocation) in plan.iter().enumerate() {
        eprintln!(
            "{} run {} {}",
            format!("[{}/{}]", i + 1, total).dimmed(),
            invocation.run,
            invocation.url
        );
        runner(invocation)?;
    }

    eprintln!(
        "{} collected {} report(s) into {}",
        "✓".green().bold(),
        total,
        dir.display()
    );
    Ok(())
}

fn run_program(program: &str, invocation: &Invocation) -> Result<(), CliError> {
    debug!(program, args = ?invocation.args, "invoking collector");
    let failed = |message: String| CliError::CollectorFailed {
        program: program.to_string(),
        url: invocation.url.clone(),
        run: invocation.run,
        message,
    };

    let status = Command::new(program)
        .args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| failed(e.to_string()))?;

    if status.success() {
        Ok(())
    } else {
        Err(failed(status.to_string()))
    }
}
