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

//! Test fixtures for common test scenarios

use bfm_memtest::core::engine::{Engine, MemTest};
use bfm_memtest::core::report::TestResult;
use bfm_memtest::core::transactor::{MemoryModel, Protocol};
use bfm_memtest::core::window::AddressWindow;

/// The 256-byte window used by the stock word tests
#[allow(dead_code)]
pub const STOCK_WINDOW: AddressWindow = AddressWindow::new(0, 0x100);

/// Create a fault-free AXI4 memory model
#[allow(dead_code)]
pub fn create_axi_model() -> MemoryModel {
    MemoryModel::new(Protocol::Axi4)
}

/// Create a model whose reads of the given bytes come back corrupted
#[allow(dead_code)]
pub fn create_faulty_model(faults: &[u32]) -> MemoryModel {
    let mut model = create_axi_model();
    for &addr in faults {
        model.corrupt_read(addr);
    }
    model
}

/// Run a test and return its result, panicking on interface errors
#[allow(dead_code)]
pub fn run_test(model: &mut MemoryModel, test: &MemTest, window: AddressWindow) -> TestResult {
    Engine::new(model)
        .run(test, window)
        .expect("Interface error during test run")
}
