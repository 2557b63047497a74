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

//! Address window under test
//!
//! A window is the half-open byte range `[start, start + length)`. Tests walk
//! it in fixed-size access units (one beat, or one whole burst) that must tile
//! the window exactly.

use super::error::{HarnessError, Result};
use std::fmt;

/// Byte range tested by a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressWindow {
    /// First byte address
    pub start: u32,
    /// Number of bytes
    pub length: u32,
}

impl AddressWindow {
    /// Create a new window
    pub const fn new(start: u32, length: u32) -> Self {
        Self { start, length }
    }

    /// Whether the window covers no bytes
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// One past the last byte address
    ///
    /// Returned as `u64` so a window ending exactly at 4GiB is representable.
    pub const fn end(&self) -> u64 {
        self.start as u64 + self.length as u64
    }

    /// Check that the window can be tiled by `unit`-byte accesses
    ///
    /// `align` is the required alignment of `start` (the beat width).
    ///
    /// # Errors
    ///
    /// - [`HarnessError::MisalignedWindow`] if `start` is not `align`-aligned
    ///   or `length` is not a multiple of `unit`
    /// - [`HarnessError::WindowOverflow`] if the window passes 4GiB
    pub fn validate(&self, unit: u32, align: u32) -> Result<()> {
        if unit == 0 || self.length % unit != 0 || self.start % align.max(1) != 0 {
            return Err(HarnessError::MisalignedWindow {
                start: self.start,
                length: self.length,
                unit,
            });
        }
        if self.end() > u64::from(u32::MAX) + 1 {
            return Err(HarnessError::WindowOverflow {
                start: self.start,
                length: self.length,
            });
        }
        Ok(())
    }

    /// Start addresses of each `unit`-byte access, in ascending order
    ///
    /// Call [`validate`](Self::validate) first; a trailing partial unit is
    /// not yielded.
    ///
    /// # Example
    ///
    /// ```
    /// use bfm_memtest::core::window::AddressWindow;
    ///
    /// let window = AddressWindow::new(0x100, 16);
    /// let addrs: Vec<u32> = window.units(4).collect();
    /// assert_eq!(addrs, vec![0x100, 0x104, 0x108, 0x10C]);
    /// ```
    pub fn units(&self, unit: u32) -> impl Iterator<Item = u32> {
        let start = self.start as u64;
        let count = if unit == 0 { 0 } else { self.length / unit };
        (0..count as u64).map(move |i| (start + i * unit as u64) as u32)
    }
}

impl fmt::Display for AddressWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}+0x{:X}", self.start, self.length)
    }
}
