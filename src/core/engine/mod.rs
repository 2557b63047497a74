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

//! Memory verification engine
//!
//! The engine drives a [`Transactor`] through an [`AddressWindow`], writing
//! generated payloads and comparing what comes back. All six stock tests
//! (and their fixed-address variants) share one algorithm body,
//! parameterized by a [`MemTest`] descriptor.
//!
//! # Timing
//!
//! ```text
//! Immediate:  W0 R0  W1 R1  W2 R2 ...
//! Deferred:   W0 W1 W2 ...  | rewind pattern |  R0 R1 R2 ...
//! ```
//!
//! Deferred tests never store what they wrote. The pattern generator is
//! rewound before the read pass and replays the write-pass sequence, so each
//! read recomputes its own expectation (see [`crate::core::pattern`]).
//!
//! # Mismatches
//!
//! A mismatch is data, not an error: it is counted per beat and the walk
//! always continues to the end of the window. Errors returned by the
//! transactor abort the run immediately and no result is produced.
//!
//! # Example
//!
//! ```
//! use bfm_memtest::core::engine::{Engine, MemTest};
//! use bfm_memtest::core::transactor::{MemoryModel, Protocol};
//! use bfm_memtest::core::window::AddressWindow;
//!
//! let mut model = MemoryModel::new(Protocol::Axi4);
//! let mut engine = Engine::new(&mut model);
//!
//! let result = engine.run(&MemTest::burst_raw(8), AddressWindow::new(0, 64)).unwrap();
//! assert_eq!(result.tested(), 64);
//! assert!(result.passed());
//! ```

use crate::core::error::{HarnessError, Result};
use crate::core::pattern::BeatGenerator;
use crate::core::report::TestResult;
use crate::core::transactor::{Capabilities, Transactor};
use crate::core::width::AccessWidth;
use crate::core::window::AddressWindow;
use log::{debug, info, trace, warn};

pub mod strategy;

#[cfg(test)]
mod tests;

pub use strategy::{
    Addressing, BurstDescriptor, MemTest, Strategy, Timing, TransferShape, SEED_BURST,
    SEED_RANDOM, SEED_RANDOM_RAW,
};

/// Runs memory tests against a borrowed transactor
///
/// The engine holds the transactor exclusively for its lifetime and issues
/// one blocking call at a time.
pub struct Engine<'a, T: Transactor + ?Sized> {
    transactor: &'a mut T,
}

/// Per-run transfer geometry
#[derive(Debug, Clone, Copy)]
struct Geometry {
    width: AccessWidth,
    beats: usize,
    fixed: bool,
    /// Bytes covered by one transaction
    unit: u32,
}

impl Geometry {
    fn beat_addr(&self, addr: u32, beat: usize) -> u32 {
        if self.fixed {
            addr
        } else {
            addr.wrapping_add(beat as u32 * self.width.bytes())
        }
    }
}

impl<'a, T: Transactor + ?Sized> Engine<'a, T> {
    pub fn new(transactor: &'a mut T) -> Self {
        Self { transactor }
    }

    /// Run one test over `window`
    ///
    /// # Returns
    ///
    /// A [`TestResult`] carrying the window length and the number of
    /// mismatching beats.
    ///
    /// # Errors
    ///
    /// - Configuration errors (fixed bursts on a transactor without them,
    ///   zero-length bursts, windows not tiled by the access unit) are
    ///   raised before any interface call.
    /// - Bursts the transactor refuses fail before any payload is built.
    /// - Transport errors from the transactor abort the run.
    pub fn run(&mut self, test: &MemTest, window: AddressWindow) -> Result<TestResult> {
        let label = test.label();
        let geometry = self.plan(test, window)?;

        if window.is_empty() {
            return Ok(TestResult::new(label, 0, 0));
        }

        debug!(
            "{}: window {} unit {} bytes, {} beat(s) of {} bytes",
            label,
            window,
            geometry.unit,
            geometry.beats,
            geometry.width.bytes()
        );

        let mut generator = BeatGenerator::new(test.pattern);
        let mismatches = match test.strategy.timing {
            Timing::Immediate => self.run_immediate(&mut generator, window, geometry)?,
            Timing::Deferred => {
                self.run_deferred(&mut generator, window, geometry, test.replay_seed())?
            }
        };

        let result = TestResult::new(label, window.length, mismatches);
        if result.passed() {
            info!("{}", result);
        } else {
            warn!("{}", result);
        }
        Ok(result)
    }

    /// Counter pattern, read back immediately
    pub fn address_raw(&mut self, window: AddressWindow) -> Result<TestResult> {
        self.run(&MemTest::address_raw(), window)
    }

    /// Counter pattern, verified after the whole window is written
    pub fn address(&mut self, window: AddressWindow) -> Result<TestResult> {
        self.run(&MemTest::address(), window)
    }

    /// Random pattern of `width` bytes, read back immediately
    pub fn random_raw(&mut self, window: AddressWindow, width: u32) -> Result<TestResult> {
        self.run(&MemTest::random_raw(width), window)
    }

    /// Random pattern of `width` bytes, verified after the whole window is written
    pub fn random(&mut self, window: AddressWindow, width: u32) -> Result<TestResult> {
        self.run(&MemTest::random(width), window)
    }

    /// Random bursts of `length` words, read back immediately
    pub fn burst_raw(&mut self, window: AddressWindow, length: u32) -> Result<TestResult> {
        self.run(&MemTest::burst_raw(length), window)
    }

    /// Random bursts of `length` words, verified after the whole window is written
    pub fn burst(&mut self, window: AddressWindow, length: u32) -> Result<TestResult> {
        self.run(&MemTest::burst(length), window)
    }

    /// Validate a test against the transactor and window
    fn plan(&self, test: &MemTest, window: AddressWindow) -> Result<Geometry> {
        let beats = test.strategy.beats();
        if beats == 0 {
            return Err(HarnessError::InvalidBurstLength(beats));
        }

        let fixed = test.strategy.addressing() == Addressing::Fixed;
        if fixed
            && !self
                .transactor
                .capabilities()
                .contains(Capabilities::FIXED_BURST)
        {
            return Err(HarnessError::FixedBurstUnsupported {
                protocol: self.transactor.protocol(),
            });
        }

        let width = test.width;
        let unit = if fixed {
            width.bytes()
        } else {
            width
                .bytes()
                .checked_mul(beats)
                .ok_or(HarnessError::InvalidBurstLength(beats))?
        };
        window.validate(unit, width.bytes())?;
        // Fixed units never bound the burst, so ask before sizing buffers
        self.transactor.check_burst(beats)?;

        Ok(Geometry {
            width,
            beats: beats as usize,
            fixed,
            unit,
        })
    }

    fn run_immediate(
        &mut self,
        generator: &mut BeatGenerator,
        window: AddressWindow,
        geometry: Geometry,
    ) -> Result<u64> {
        let mut written = vec![0u32; geometry.beats];
        let mut read = vec![0u32; geometry.beats];
        let mut mismatches = 0;

        for addr in window.units(geometry.unit) {
            generator.fill(&mut written, geometry.width, |beat| {
                geometry.beat_addr(addr, beat)
            });
            self.write(addr, &written, geometry)?;
            self.read(addr, &mut read, geometry)?;
            mismatches += compare(addr, &written, &read, geometry);
        }
        Ok(mismatches)
    }

    fn run_deferred(
        &mut self,
        generator: &mut BeatGenerator,
        window: AddressWindow,
        geometry: Geometry,
        replay_seed: Option<u64>,
    ) -> Result<u64> {
        let mut buffer = vec![0u32; geometry.beats];

        debug!("Write pass over {}", window);
        for addr in window.units(geometry.unit) {
            generator.fill(&mut buffer, geometry.width, |beat| {
                geometry.beat_addr(addr, beat)
            });
            self.write(addr, &buffer, geometry)?;
        }

        match replay_seed {
            Some(seed) => generator.reseed(seed),
            None => generator.rewind(),
        }

        debug!("Read pass over {}", window);
        let mut read = vec![0u32; geometry.beats];
        let mut mismatches = 0;
        for addr in window.units(geometry.unit) {
            generator.fill(&mut buffer, geometry.width, |beat| {
                geometry.beat_addr(addr, beat)
            });
            self.read(addr, &mut read, geometry)?;
            mismatches += compare(addr, &buffer, &read, geometry);
        }
        Ok(mismatches)
    }

    fn write(&mut self, addr: u32, data: &[u32], geometry: Geometry) -> Result<()> {
        if geometry.fixed {
            self.transactor.write_fixed(addr, data, geometry.width)
        } else {
            self.transactor.write(addr, data, geometry.width)
        }
    }

    fn read(&mut self, addr: u32, data: &mut [u32], geometry: Geometry) -> Result<()> {
        if geometry.fixed {
            self.transactor.read_fixed(addr, data, geometry.width)
        } else {
            self.transactor.read(addr, data, geometry.width)
        }
    }
}

/// Count beats of `read` that differ from what `written` left in memory
///
/// A fixed-address burst leaves only its final beat in memory, so every
/// beat read back is checked against that one.
fn compare(addr: u32, written: &[u32], read: &[u32], geometry: Geometry) -> u64 {
    let mut mismatches = 0;
    for (beat, &actual) in read.iter().enumerate() {
        let expected = if geometry.fixed {
            written[written.len() - 1]
        } else {
            written[beat]
        };
        let actual = geometry.width.apply(actual);
        if actual != expected {
            trace!(
                "Mismatch at 0x{:08X}: expected 0x{:08X}, read 0x{:08X}",
                geometry.beat_addr(addr, beat),
                expected,
                actual
            );
            mismatches += 1;
        }
    }
    mismatches
}
