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

//! Reference transactor backed by a simulated memory
//!
//! `MemoryModel` stores exactly what it is told and returns it unchanged.
//! It is the fault-free baseline every strategy must pass against, and it
//! can be told to misbehave in controlled ways:
//!
//! | Fault              | Effect                                           |
//! |--------------------|--------------------------------------------------|
//! | `corrupt_read`     | inverts one byte lane of any beat read over it   |
//! | `stuck_bits`       | forces bits of a stored byte on every write      |
//! | `fail_control`     | control primitives return a negative status code |
//!
//! Memory is sparse and little-endian; bytes never written read as zero.
//!
//! # Example
//!
//! ```
//! use bfm_memtest::core::transactor::{MemoryModel, Protocol, Transactor};
//! use bfm_memtest::core::width::AccessWidth;
//!
//! let mut model = MemoryModel::new(Protocol::Axi4);
//! model.write(0x40, &[0x1234_5678], AccessWidth::Word).unwrap();
//!
//! let mut data = [0u32; 1];
//! model.read(0x40, &mut data, AccessWidth::Half).unwrap();
//! assert_eq!(data[0], 0x5678);
//! ```

use super::{check_status, Protocol, Transactor, STATUS_UNSUPPORTED};
use crate::core::error::{HarnessError, Result};
use crate::core::width::AccessWidth;
use log::trace;
use std::collections::HashMap;

/// Number of simulated cards reachable through [`MemoryModel::open`]
pub const SIM_CARDS: u32 = 4;

/// Interface call counters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CallCounts {
    pub writes: usize,
    pub reads: usize,
    pub fixed_writes: usize,
    pub fixed_reads: usize,
    pub control: usize,
}

impl CallCounts {
    /// Sum of all counters
    pub fn total(&self) -> usize {
        self.writes + self.reads + self.fixed_writes + self.fixed_reads + self.control
    }
}

/// Simulated memory behind a transactor
#[derive(Debug, Clone)]
pub struct MemoryModel {
    protocol: Protocol,
    cid: u32,
    memory: HashMap<u32, u8>,
    max_burst: u32,

    /// Configured ceiling kept across protocol selection
    burst_cap: Option<u32>,

    /// Byte addresses whose read lane is inverted
    read_faults: HashMap<u32, u8>,

    /// Byte address -> (mask, level) forced on write
    stuck: HashMap<u32, (u8, u8)>,

    /// Status code returned by every control primitive, if set
    control_failure: Option<i32>,

    gpio: u16,
    calls: CallCounts,
}

impl MemoryModel {
    /// Create an empty memory speaking `protocol`
    pub fn new(protocol: Protocol) -> Self {
        Self {
            protocol,
            cid: 0,
            memory: HashMap::new(),
            max_burst: protocol.max_burst(),
            burst_cap: None,
            read_faults: HashMap::new(),
            stuck: HashMap::new(),
            control_failure: None,
            gpio: 0,
            calls: CallCounts::default(),
        }
    }

    /// Open simulated card `cid`
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::NotConnected`] if no card has that id.
    pub fn open(cid: u32, protocol: Protocol) -> Result<Self> {
        if cid >= SIM_CARDS {
            return Err(HarnessError::NotConnected(cid));
        }
        let mut model = Self::new(protocol);
        model.cid = cid;
        Ok(model)
    }

    /// Connection id this model was opened with
    pub fn cid(&self) -> u32 {
        self.cid
    }

    /// Limit bursts to `max` beats
    ///
    /// The limit survives protocol selection: the mode then reports the
    /// smaller of `max` and the protocol's own maximum.
    pub fn with_max_burst(mut self, max: u32) -> Self {
        self.max_burst = max;
        self.burst_cap = Some(max);
        self
    }

    /// Longest burst currently accepted
    pub fn max_burst(&self) -> u32 {
        self.max_burst
    }

    /// Invert the byte at `addr` in every beat read over it
    ///
    /// The stored value is untouched.
    pub fn corrupt_read(&mut self, addr: u32) {
        self.read_faults.insert(addr, 0xFF);
    }

    /// Force the bits in `mask` of the byte at `addr` to `level` on write
    pub fn stuck_bits(&mut self, addr: u32, mask: u8, level: bool) {
        let value = if level { mask } else { 0 };
        self.stuck.insert(addr, (mask, value));
    }

    /// Make every control primitive fail with `code` (must be negative)
    pub fn fail_control(&mut self, code: i32) {
        self.control_failure = Some(code);
    }

    /// Remove all injected faults
    pub fn clear_faults(&mut self) {
        self.read_faults.clear();
        self.stuck.clear();
        self.control_failure = None;
    }

    /// Interface calls made so far
    pub fn calls(&self) -> CallCounts {
        self.calls
    }

    /// Read stored memory without going through the bus
    pub fn peek(&self, addr: u32, width: AccessWidth) -> u32 {
        (0..width.bytes()).fold(0, |acc, k| {
            let byte = self
                .memory
                .get(&addr.wrapping_add(k))
                .copied()
                .unwrap_or(0);
            acc | (byte as u32) << (8 * k)
        })
    }

    fn check_burst_len(&self, length: usize) -> Result<()> {
        let length = u32::try_from(length).unwrap_or(u32::MAX);
        self.check_burst(length)
    }

    fn store(&mut self, addr: u32, value: u32, width: AccessWidth) {
        for k in 0..width.bytes() {
            let byte_addr = addr.wrapping_add(k);
            let mut byte = (value >> (8 * k)) as u8;
            if let Some(&(mask, level)) = self.stuck.get(&byte_addr) {
                byte = (byte & !mask) | level;
            }
            self.memory.insert(byte_addr, byte);
        }
    }

    fn load(&self, addr: u32, width: AccessWidth) -> u32 {
        let mut value = self.peek(addr, width);
        for k in 0..width.bytes() {
            if let Some(&flip) = self.read_faults.get(&addr.wrapping_add(k)) {
                trace!("Corrupting read lane {} at 0x{:08X}", k, addr);
                value ^= (flip as u32) << (8 * k);
            }
        }
        value
    }

    fn control(&mut self, operation: &'static str, code: i32) -> Result<i32> {
        self.calls.control += 1;
        check_status(operation, self.control_failure.unwrap_or(code))
    }
}

impl Transactor for MemoryModel {
    fn protocol(&self) -> Protocol {
        self.protocol
    }

    fn check_burst(&self, beats: u32) -> Result<()> {
        if beats > self.max_burst {
            return Err(HarnessError::BurstTooLong {
                length: beats,
                max: self.max_burst,
            });
        }
        Ok(())
    }

    fn write(&mut self, addr: u32, data: &[u32], width: AccessWidth) -> Result<()> {
        self.calls.writes += 1;
        self.check_burst_len(data.len())?;
        let step = width.bytes();
        for (i, &value) in data.iter().enumerate() {
            self.store(addr.wrapping_add(i as u32 * step), value, width);
        }
        Ok(())
    }

    fn read(&mut self, addr: u32, data: &mut [u32], width: AccessWidth) -> Result<()> {
        self.calls.reads += 1;
        self.check_burst_len(data.len())?;
        let step = width.bytes();
        for (i, slot) in data.iter_mut().enumerate() {
            *slot = self.load(addr.wrapping_add(i as u32 * step), width);
        }
        Ok(())
    }

    fn write_fixed(&mut self, addr: u32, data: &[u32], width: AccessWidth) -> Result<()> {
        self.calls.fixed_writes += 1;
        if !self.protocol.capabilities().contains(super::Capabilities::FIXED_BURST) {
            return Err(HarnessError::FixedBurstUnsupported {
                protocol: self.protocol,
            });
        }
        self.check_burst_len(data.len())?;
        for &value in data {
            self.store(addr, value, width);
        }
        Ok(())
    }

    fn read_fixed(&mut self, addr: u32, data: &mut [u32], width: AccessWidth) -> Result<()> {
        self.calls.fixed_reads += 1;
        if !self.protocol.capabilities().contains(super::Capabilities::FIXED_BURST) {
            return Err(HarnessError::FixedBurstUnsupported {
                protocol: self.protocol,
            });
        }
        self.check_burst_len(data.len())?;
        for slot in data.iter_mut() {
            *slot = self.load(addr, width);
        }
        Ok(())
    }

    fn set_protocol_mode(&mut self) -> Result<u32> {
        let code = match self.protocol {
            Protocol::Axi4 => self.protocol.max_burst() as i32,
            Protocol::Ahb => STATUS_UNSUPPORTED,
        };
        let reported = self.control("set_protocol_mode", code)? as u32;
        self.max_burst = self.burst_cap.map_or(reported, |cap| cap.min(reported));
        Ok(self.max_burst)
    }

    fn gpio_out(&mut self, value: u32) -> Result<()> {
        self.control("gpio_out", 0)?;
        self.gpio = value as u16;
        Ok(())
    }

    fn gpio_in(&mut self) -> Result<u32> {
        self.control("gpio_in", 0)?;
        Ok(self.gpio as u32)
    }
}
