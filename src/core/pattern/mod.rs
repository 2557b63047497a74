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

//! Test pattern generation
//!
//! Two kinds of payload are written to memory under test:
//!
//! - **Address** patterns: each beat carries its own byte address plus a
//!   constant offset, so the expected value can be recomputed from the
//!   address alone.
//! - **Random** patterns: values come from a seeded [`PatternStream`].
//!
//! # Deterministic Replay
//!
//! Written values are never stored. A deferred test re-seeds its stream with
//! the write-pass seed before the read pass and then draws values in exactly
//! the same order, so beat `n` of the read pass sees the value that was
//! written at beat `n`:
//!
//! ```text
//!   seed(S) ─ next ─ next ─ next ─ ...   write pass
//!   seed(S) ─ next ─ next ─ next ─ ...   read pass (identical values)
//! ```
//!
//! Any divergence in seed or call order shows up as mismatches, which is how
//! the harness detects its own desynchronisation.

use crate::core::width::AccessWidth;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};


/// Deterministic stream of 32-bit pseudo-random values
///
/// Two streams seeded with the same value produce the same sequence.
///
/// # Example
///
/// ```
/// use bfm_memtest::core::pattern::PatternStream;
///
/// let mut a = PatternStream::new(0x11);
/// let mut b = PatternStream::new(0x11);
/// assert_eq!(a.next_u32(), b.next_u32());
///
/// let first = a.next_u32();
/// a.seed(0x11);
/// a.next_u32();
/// assert_eq!(a.next_u32(), first);
/// ```
#[derive(Debug, Clone)]
pub struct PatternStream {
    seed: u64,
    rng: StdRng,
    position: u64,
}

impl PatternStream {
    /// Create a stream positioned at the start of the sequence for `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            position: 0,
        }
    }

    /// Reset the stream to the start of the sequence for `seed`
    pub fn seed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = StdRng::seed_from_u64(seed);
        self.position = 0;
    }

    /// Rewind to the start of the current seed's sequence
    pub fn rewind(&mut self) {
        self.seed(self.seed);
    }

    /// Seed the stream was last reset with
    pub fn current_seed(&self) -> u64 {
        self.seed
    }

    /// Number of values drawn since the last reset
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Next value in the sequence
    pub fn next_u32(&mut self) -> u32 {
        self.position += 1;
        self.rng.next_u32()
    }

    /// Next value with `mask` applied
    pub fn next_masked(&mut self, mask: u32) -> u32 {
        self.next_u32() & mask
    }
}

impl Iterator for PatternStream {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        Some(self.next_u32())
    }
}

/// Kind of payload written by a test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Each beat carries `address + offset`
    Address { offset: u32 },
    /// Values drawn from a [`PatternStream`] seeded with `seed`
    Random { seed: u64 },
}

impl Pattern {
    /// Short name used in report labels
    pub fn name(&self) -> &'static str {
        match self {
            Pattern::Address { .. } => "address",
            Pattern::Random { .. } => "random",
        }
    }
}

/// Produces the payload for each beat of a test
///
/// Wraps a [`Pattern`] with the stream state needed to replay it. The
/// engine asks for one value per beat, in transfer order.
#[derive(Debug, Clone)]
pub struct BeatGenerator {
    pattern: Pattern,
    stream: PatternStream,
}

impl BeatGenerator {
    /// Create a generator positioned at the start of the pattern
    pub fn new(pattern: Pattern) -> Self {
        let seed = match pattern {
            Pattern::Random { seed } => seed,
            Pattern::Address { .. } => 0,
        };
        Self {
            pattern,
            stream: PatternStream::new(seed),
        }
    }

    /// Restart the pattern from the beginning
    pub fn rewind(&mut self) {
        self.stream.rewind();
    }

    /// Restart the pattern using a different random seed
    ///
    /// Has no effect on the values of an address pattern.
    pub fn reseed(&mut self, seed: u64) {
        self.stream.seed(seed);
    }

    /// Pattern being generated
    pub fn pattern(&self) -> Pattern {
        self.pattern
    }

    /// Value for the beat transferred at `beat_addr`, masked to `width`
    pub fn value(&mut self, beat_addr: u32, width: AccessWidth) -> u32 {
        match self.pattern {
            Pattern::Address { offset } => width.apply(beat_addr.wrapping_add(offset)),
            Pattern::Random { .. } => self.stream.next_masked(width.mask()),
        }
    }

    /// Fill `buf` with the values for one burst
    ///
    /// `beat_addr` maps a beat index to the address that beat lands on.
    pub fn fill<F>(&mut self, buf: &mut [u32], width: AccessWidth, beat_addr: F)
    where
        F: Fn(usize) -> u32,
    {
        for (i, slot) in buf.iter_mut().enumerate() {
            *slot = self.value(beat_addr(i), width);
        }
    }
}
