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

//! Per-beat access width
//!
//! Data words exchanged with a transactor are always 32 bits wide and
//! right-justified; the access width says how many of the low bytes are
//! actually transferred. Comparisons are made on the masked value.

use log::debug;
use std::fmt;

/// Number of bytes transferred per beat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccessWidth {
    /// 8-bit access
    Byte,
    /// 16-bit access
    Half,
    /// 32-bit access
    #[default]
    Word,
}

impl AccessWidth {
    /// Build a width from a byte count
    ///
    /// Any value other than 1, 2 or 4 falls back to [`AccessWidth::Word`].
    ///
    /// # Example
    ///
    /// ```
    /// use bfm_memtest::core::width::AccessWidth;
    ///
    /// assert_eq!(AccessWidth::from_bytes(2), AccessWidth::Half);
    /// assert_eq!(AccessWidth::from_bytes(3), AccessWidth::Word);
    /// ```
    pub fn from_bytes(bytes: u32) -> Self {
        match bytes {
            1 => AccessWidth::Byte,
            2 => AccessWidth::Half,
            4 => AccessWidth::Word,
            other => {
                debug!("Access width {} not supported, using 4", other);
                AccessWidth::Word
            }
        }
    }

    /// Size of one beat in bytes
    pub const fn bytes(self) -> u32 {
        match self {
            AccessWidth::Byte => 1,
            AccessWidth::Half => 2,
            AccessWidth::Word => 4,
        }
    }

    /// Mask selecting the significant bits of a right-justified beat
    pub const fn mask(self) -> u32 {
        match self {
            AccessWidth::Byte => 0x0000_00FF,
            AccessWidth::Half => 0x0000_FFFF,
            AccessWidth::Word => 0xFFFF_FFFF,
        }
    }

    /// Apply the width mask to a value
    #[inline(always)]
    pub const fn apply(self, value: u32) -> u32 {
        value & self.mask()
    }
}

impl fmt::Display for AccessWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_supported() {
        assert_eq!(AccessWidth::from_bytes(1), AccessWidth::Byte);
        assert_eq!(AccessWidth::from_bytes(2), AccessWidth::Half);
        assert_eq!(AccessWidth::from_bytes(4), AccessWidth::Word);
    }

    #[test]
    fn test_from_bytes_falls_back_to_word() {
        for bytes in [0, 3, 5, 8, 16, u32::MAX] {
            let width = AccessWidth::from_bytes(bytes);
            assert_eq!(width, AccessWidth::Word);
            assert_eq!(width.mask(), 0xFFFF_FFFF);
        }
    }

    #[test]
    fn test_masks() {
        assert_eq!(AccessWidth::Byte.apply(0x1234_5678), 0x78);
        assert_eq!(AccessWidth::Half.apply(0x1234_5678), 0x5678);
        assert_eq!(AccessWidth::Word.apply(0x1234_5678), 0x1234_5678);
    }

    #[test]
    fn test_display() {
        assert_eq!(AccessWidth::Half.to_string(), "2");
    }
}
