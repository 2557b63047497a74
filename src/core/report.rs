// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Test results and their textual form

use crate::core::transactor::Protocol;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Outcome of one test run
///
/// A run with `mismatches == 0` passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestResult {
    label: String,
    tested: u32,
    mismatches: u64,
}

impl TestResult {
    pub fn new(label: impl Into<String>, tested: u32, mismatches: u64) -> Self {
        Self {
            label: label.into(),
            tested,
            mismatches,
        }
    }

    /// Test label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Bytes covered by the run
    pub fn tested(&self) -> u32 {
        self.tested
    }

    /// Beats that read back a different value than expected
    pub fn mismatches(&self) -> u64 {
        self.mismatches
    }

    pub fn passed(&self) -> bool {
        self.mismatches == 0
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            write!(f, "{} {} OK", self.label, self.tested)
        } else {
            write!(
                f,
                "{} {} mis-match out of {}",
                self.label, self.mismatches, self.tested
            )
        }
    }
}

/// Format a result as a single pass/fail line
///
/// # Example
///
/// ```
/// use bfm_memtest::core::report::{report, TestResult};
///
/// assert_eq!(report(&TestResult::new("MemTestAddr", 256, 0)), "MemTestAddr 256 OK");
/// assert_eq!(
///     report(&TestResult::new("MemTestAddr", 256, 3)),
///     "MemTestAddr 3 mis-match out of 256"
/// );
/// ```
pub fn report(result: &TestResult) -> String {
    result.to_string()
}

/// Results of a whole suite run against one transactor
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub started: DateTime<Utc>,
    pub cid: u32,
    pub protocol: Protocol,
    /// Maximum burst length reported by protocol selection, if performed
    pub max_burst: Option<u32>,
    /// GPIO input sampled after driving the output low, if available
    pub gpio_in: Option<u32>,
    pub results: Vec<TestResult>,
}

impl SuiteReport {
    pub fn new(cid: u32, protocol: Protocol) -> Self {
        Self {
            started: Utc::now(),
            cid,
            protocol,
            max_burst: None,
            gpio_in: None,
            results: Vec::new(),
        }
    }

    /// Whether every test passed
    pub fn passed(&self) -> bool {
        self.results.iter().all(TestResult::passed)
    }

    /// Mismatches summed over all tests
    pub fn total_mismatches(&self) -> u64 {
        self.results.iter().map(TestResult::mismatches).sum()
    }

    /// One line per test, preceded by a header
    pub fn to_text(&self) -> String {
        let mut out = format!("{} cid {}", self.protocol, self.cid);
        if let Some(max) = self.max_burst {
            out.push_str(&format!(" burst length: {}", max));
        }
        out.push('\n');
        for result in &self.results {
            out.push_str(&report(result));
            out.push('\n');
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
