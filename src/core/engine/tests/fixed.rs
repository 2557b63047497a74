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

//! Fixed-address burst tests

use super::helpers::*;
use super::*;

#[test]
fn test_fixed_burst_raw_fault_free() {
    let mut model = create_test_model();
    let test = MemTest::burst_raw(8).with_fixed_address();
    let result = Engine::new(&mut model)
        .run(&test, AddressWindow::new(0, 64))
        .unwrap();

    assert_eq!(result.label(), "MemTestBurstRAW burst 8 fixed");
    assert_eq!(result.tested(), 64);
    assert!(result.passed());
    // One burst per word location, incrementing primitives unused
    assert_eq!(model.calls().fixed_writes, 16);
    assert_eq!(model.calls().fixed_reads, 16);
    assert_eq!(model.calls().writes, 0);
}

#[test]
fn test_fixed_burst_deferred_fault_free() {
    let test = MemTest::burst(4).with_fixed_address();
    let result = run_clean(&test, AddressWindow::new(0x100, 64));
    assert!(result.passed());
}

#[test]
fn test_fixed_burst_fault_hits_every_beat() {
    let mut model = create_test_model();
    model.corrupt_read(0x8);

    let test = MemTest::burst_raw(4).with_fixed_address();
    let result = Engine::new(&mut model)
        .run(&test, AddressWindow::new(0, 32))
        .unwrap();
    assert_eq!(result.mismatches(), 4);
}

#[test]
fn test_fixed_single_beat() {
    let test = MemTest::address().with_fixed_address();
    assert_eq!(test.strategy.addressing(), Addressing::Fixed);
    let result = run_clean(&test, AddressWindow::new(0, 64));
    assert!(result.passed());
}

#[test]
fn test_fixed_rejected_before_any_call() {
    let mut model = MemoryModel::new(Protocol::Ahb);
    let test = MemTest::burst_raw(8).with_fixed_address();

    let err = Engine::new(&mut model)
        .run(&test, AddressWindow::new(0, 64))
        .unwrap_err();

    assert!(matches!(
        err,
        HarnessError::FixedBurstUnsupported {
            protocol: Protocol::Ahb
        }
    ));
    assert!(err.is_configuration());
    assert_eq!(model.calls().total(), 0);
}

#[test]
fn test_fixed_rejected_even_for_empty_window() {
    let mut model = MemoryModel::new(Protocol::Ahb);
    let test = MemTest::burst(2).with_fixed_address();
    assert!(Engine::new(&mut model)
        .run(&test, AddressWindow::new(0, 0))
        .is_err());
}
