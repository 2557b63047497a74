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

//! Helper transactors and functions for engine tests

use super::*;
use crate::core::transactor::Protocol;

/// Creates a fault-free AXI4 memory model
#[allow(dead_code)]
pub fn create_test_model() -> MemoryModel {
    MemoryModel::new(Protocol::Axi4)
}

/// Runs `test` over `window` on a fresh fault-free model
#[allow(dead_code)]
pub fn run_clean(test: &MemTest, window: AddressWindow) -> TestResult {
    let mut model = create_test_model();
    Engine::new(&mut model).run(test, window).unwrap()
}

/// Memory with a broken address decoder
///
/// Address bit `alias_bit` is ignored, so two halves of the address space
/// share the same storage.
pub struct AliasingMemory {
    inner: MemoryModel,
    alias_mask: u32,
}

impl AliasingMemory {
    pub fn new(alias_bit: u32) -> Self {
        Self {
            inner: create_test_model(),
            alias_mask: !(1 << alias_bit),
        }
    }
}

impl Transactor for AliasingMemory {
    fn protocol(&self) -> Protocol {
        self.inner.protocol()
    }

    fn check_burst(&self, beats: u32) -> Result<()> {
        self.inner.check_burst(beats)
    }

    fn write(&mut self, addr: u32, data: &[u32], width: AccessWidth) -> Result<()> {
        self.inner.write(addr & self.alias_mask, data, width)
    }

    fn read(&mut self, addr: u32, data: &mut [u32], width: AccessWidth) -> Result<()> {
        self.inner.read(addr & self.alias_mask, data, width)
    }

    fn set_protocol_mode(&mut self) -> Result<u32> {
        self.inner.set_protocol_mode()
    }

    fn gpio_out(&mut self, value: u32) -> Result<()> {
        self.inner.gpio_out(value)
    }

    fn gpio_in(&mut self) -> Result<u32> {
        self.inner.gpio_in()
    }
}

/// Transactor whose bus dies after a number of data transfers
pub struct DyingTransactor {
    inner: MemoryModel,
    remaining: usize,
}

impl DyingTransactor {
    pub fn new(transfers: usize) -> Self {
        Self {
            inner: create_test_model(),
            remaining: transfers,
        }
    }

    fn spend(&mut self, operation: &'static str) -> Result<()> {
        if self.remaining == 0 {
            return Err(HarnessError::Transport { operation, code: -5 });
        }
        self.remaining -= 1;
        Ok(())
    }
}

impl Transactor for DyingTransactor {
    fn protocol(&self) -> Protocol {
        self.inner.protocol()
    }

    fn check_burst(&self, beats: u32) -> Result<()> {
        self.inner.check_burst(beats)
    }

    fn write(&mut self, addr: u32, data: &[u32], width: AccessWidth) -> Result<()> {
        self.spend("write")?;
        self.inner.write(addr, data, width)
    }

    fn read(&mut self, addr: u32, data: &mut [u32], width: AccessWidth) -> Result<()> {
        self.spend("read")?;
        self.inner.read(addr, data, width)
    }

    fn set_protocol_mode(&mut self) -> Result<u32> {
        self.inner.set_protocol_mode()
    }

    fn gpio_out(&mut self, value: u32) -> Result<()> {
        self.inner.gpio_out(value)
    }

    fn gpio_in(&mut self) -> Result<u32> {
        self.inner.gpio_in()
    }
}
