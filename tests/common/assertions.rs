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

//! Custom assertions for harness testing

use bfm_memtest::core::report::TestResult;

/// Assert a result covered `tested` bytes with `mismatches` bad beats
#[allow(dead_code)]
pub fn assert_result(result: &TestResult, tested: u32, mismatches: u64) {
    assert_eq!(
        result.tested(),
        tested,
        "{}: tested {} bytes, expected {}",
        result.label(),
        result.tested(),
        tested
    );
    assert_eq!(
        result.mismatches(),
        mismatches,
        "{}: {} mismatches, expected {}",
        result.label(),
        result.mismatches(),
        mismatches
    );
}

/// Assert a result passed
#[allow(dead_code)]
pub fn assert_passed(result: &TestResult) {
    assert!(result.passed(), "{} failed: {}", result.label(), result);
}
