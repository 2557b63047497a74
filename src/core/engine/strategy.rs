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

//! Test descriptors
//!
//! A test is described along three axes:
//!
//! | Axis        | Values                  |
//! |-------------|-------------------------|
//! | Timing      | Immediate, Deferred     |
//! | Shape       | Single, Burst           |
//! | Addressing  | Incrementing, Fixed     |
//!
//! plus the payload [`Pattern`] and the per-beat [`AccessWidth`]. The stock
//! tests are available as named constructors on [`MemTest`].

use crate::core::pattern::Pattern;
use crate::core::width::AccessWidth;

/// Seed used by [`MemTest::random_raw`]
pub const SEED_RANDOM_RAW: u64 = 0x7;

/// Seed used by [`MemTest::random`]
pub const SEED_RANDOM: u64 = 0x11;

/// Seed used by [`MemTest::burst_raw`] and [`MemTest::burst`]
pub const SEED_BURST: u64 = 0x3;

/// When written data is read back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    /// Read each access back right after writing it
    Immediate,
    /// Write the whole window, then read the whole window
    Deferred,
}

/// How the address advances across the beats of a burst
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    Incrementing,
    Fixed,
}

/// Burst parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurstDescriptor {
    /// Beats per burst (at least 1)
    pub length: u32,
    /// Keep every beat on the burst's start address
    pub fixed_address: bool,
}

impl BurstDescriptor {
    /// Incrementing-address burst of `length` beats
    pub const fn incrementing(length: u32) -> Self {
        Self {
            length,
            fixed_address: false,
        }
    }

    /// Fixed-address burst of `length` beats
    pub const fn fixed(length: u32) -> Self {
        Self {
            length,
            fixed_address: true,
        }
    }
}

/// Transfer granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferShape {
    /// One beat per transaction
    Single,
    /// Multi-beat transactions
    Burst(BurstDescriptor),
}

/// Verification strategy: timing plus transfer shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strategy {
    pub timing: Timing,
    pub shape: TransferShape,
}

impl Strategy {
    pub const fn new(timing: Timing, shape: TransferShape) -> Self {
        Self { timing, shape }
    }

    /// Beats per transaction
    pub fn beats(&self) -> u32 {
        match self.shape {
            TransferShape::Single => 1,
            TransferShape::Burst(burst) => burst.length,
        }
    }

    pub fn addressing(&self) -> Addressing {
        match self.shape {
            TransferShape::Burst(BurstDescriptor {
                fixed_address: true,
                ..
            }) => Addressing::Fixed,
            _ => Addressing::Incrementing,
        }
    }
}

/// A complete test description
///
/// # Example
///
/// ```
/// use bfm_memtest::core::engine::MemTest;
///
/// let test = MemTest::random_raw(4);
/// assert_eq!(test.label(), "MemTestRAW size 4");
///
/// let test = MemTest::burst(16).with_fixed_address();
/// assert_eq!(test.label(), "MemTestBurst burst 16 fixed");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemTest {
    pub strategy: Strategy,
    pub pattern: Pattern,
    pub width: AccessWidth,
    label: Option<String>,
    replay_seed: Option<u64>,
}

impl MemTest {
    pub fn new(strategy: Strategy, pattern: Pattern, width: AccessWidth) -> Self {
        Self {
            strategy,
            pattern,
            width,
            label: None,
            replay_seed: None,
        }
    }

    /// Write each word's own address, read it back immediately
    pub fn address_raw() -> Self {
        Self::new(
            Strategy::new(Timing::Immediate, TransferShape::Single),
            Pattern::Address { offset: 0 },
            AccessWidth::Word,
        )
    }

    /// Write `address + 1` to every word, then read all of them back
    pub fn address() -> Self {
        Self::new(
            Strategy::new(Timing::Deferred, TransferShape::Single),
            Pattern::Address { offset: 1 },
            AccessWidth::Word,
        )
    }

    /// Random values of `width` bytes, each read back immediately
    ///
    /// Widths other than 1, 2 and 4 are treated as 4.
    pub fn random_raw(width: u32) -> Self {
        Self::new(
            Strategy::new(Timing::Immediate, TransferShape::Single),
            Pattern::Random {
                seed: SEED_RANDOM_RAW,
            },
            AccessWidth::from_bytes(width),
        )
    }

    /// Random values of `width` bytes, written in one pass and verified in a second
    pub fn random(width: u32) -> Self {
        Self::new(
            Strategy::new(Timing::Deferred, TransferShape::Single),
            Pattern::Random { seed: SEED_RANDOM },
            AccessWidth::from_bytes(width),
        )
    }

    /// Random word bursts, each read back immediately
    pub fn burst_raw(length: u32) -> Self {
        Self::new(
            Strategy::new(
                Timing::Immediate,
                TransferShape::Burst(BurstDescriptor::incrementing(length)),
            ),
            Pattern::Random { seed: SEED_BURST },
            AccessWidth::Word,
        )
    }

    /// Random word bursts, all written before any is read back
    pub fn burst(length: u32) -> Self {
        Self::new(
            Strategy::new(
                Timing::Deferred,
                TransferShape::Burst(BurstDescriptor::incrementing(length)),
            ),
            Pattern::Random { seed: SEED_BURST },
            AccessWidth::Word,
        )
    }

    /// Use a different seed for a random pattern
    pub fn with_seed(mut self, seed: u64) -> Self {
        if let Pattern::Random { .. } = self.pattern {
            self.pattern = Pattern::Random { seed };
        }
        self
    }

    pub fn with_width(mut self, width: AccessWidth) -> Self {
        self.width = width;
        self
    }

    /// Switch a burst test to fixed-address transfers
    ///
    /// A single-beat test becomes a one-beat fixed burst.
    pub fn with_fixed_address(mut self) -> Self {
        let length = self.strategy.beats();
        self.strategy.shape = TransferShape::Burst(BurstDescriptor::fixed(length));
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Seed the read pass of a deferred test differently from the write pass
    ///
    /// Used as a negative control: a correct harness must then report
    /// mismatches. Ignored by immediate tests.
    pub fn with_replay_seed(mut self, seed: u64) -> Self {
        self.replay_seed = Some(seed);
        self
    }

    pub fn replay_seed(&self) -> Option<u64> {
        self.replay_seed
    }

    /// Label used in reports
    pub fn label(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }

        let mut label = String::from("MemTest");
        if let Pattern::Address { .. } = self.pattern {
            label.push_str("Addr");
        }
        if let TransferShape::Burst(_) = self.strategy.shape {
            label.push_str("Burst");
        }
        if self.strategy.timing == Timing::Immediate {
            label.push_str("RAW");
        }

        match self.strategy.shape {
            TransferShape::Burst(burst) => {
                label.push_str(&format!(" burst {}", burst.length));
                if burst.fixed_address {
                    label.push_str(" fixed");
                }
            }
            TransferShape::Single => {
                let is_address = matches!(self.pattern, Pattern::Address { .. });
                if !is_address || self.width != AccessWidth::Word {
                    label.push_str(&format!(" size {}", self.width));
                }
            }
        }
        label
    }
}
