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

//! Bus transactor interface
//!
//! A transactor turns primitive read/write calls into bus transactions on
//! the memory under test. The verification engine only ever talks to the
//! hardware through the [`Transactor`] trait.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │      Verification Engine     │
//! └──────────────┬───────────────┘
//!                │ &mut dyn Transactor
//!       ┌────────┴─────────┐
//!       ▼                  ▼
//! ┌─────────────┐   ┌─────────────┐
//! │ MemoryModel │   │ vendor BFM  │
//! │ (reference) │   │  binding    │
//! └─────────────┘   └─────────────┘
//! ```
//!
//! # Data Layout
//!
//! Every beat is carried in a `u32`, right-justified: for a 1-byte access
//! only bits `[7:0]` are significant, for a 2-byte access bits `[15:0]`.
//! A burst is a slice of beats; its length is the burst length.
//!
//! # Status Codes
//!
//! Control primitives of the native BFM library return an `int` that is
//! negative on failure. Bindings pass these through [`check_status`] so
//! the failure surfaces as [`HarnessError::Transport`].

use crate::core::error::{HarnessError, Result};
use crate::core::width::AccessWidth;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod model;


pub use model::MemoryModel;

/// Status code returned by a control primitive the transactor lacks
pub const STATUS_UNSUPPORTED: i32 = -1;

/// Maximum AXI4 burst length (AxLEN + 1)
pub const AXI4_MAX_BURST: u32 = 256;

/// Maximum AHB burst length (INCR16)
pub const AHB_MAX_BURST: u32 = 16;

bitflags! {
    /// Optional primitives a transactor provides
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Capabilities: u8 {
        /// `write_fixed` / `read_fixed`
        const FIXED_BURST = 1 << 0;
        /// `set_protocol_mode`
        const PROTOCOL_SELECT = 1 << 1;
        /// `gpio_out` / `gpio_in`
        const GPIO = 1 << 2;
    }
}

/// Bus protocol spoken by the transactor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// AMBA AHB
    Ahb,
    /// AMBA AXI4
    #[default]
    Axi4,
}

impl Protocol {
    /// Primitives available under this protocol
    pub fn capabilities(self) -> Capabilities {
        match self {
            Protocol::Ahb => Capabilities::GPIO,
            Protocol::Axi4 => Capabilities::all(),
        }
    }

    /// Largest burst the protocol can express
    pub fn max_burst(self) -> u32 {
        match self {
            Protocol::Ahb => AHB_MAX_BURST,
            Protocol::Axi4 => AXI4_MAX_BURST,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Ahb => write!(f, "AMBA AHB"),
            Protocol::Axi4 => write!(f, "AMBA AXI4"),
        }
    }
}

/// Map a native status code to a `Result`
///
/// Non-negative codes are passed through; negative codes become
/// [`HarnessError::Transport`].
///
/// # Example
///
/// ```
/// use bfm_memtest::core::transactor::check_status;
///
/// assert_eq!(check_status("gpio_out", 0).unwrap(), 0);
/// assert!(check_status("gpio_out", -3).is_err());
/// ```
pub fn check_status(operation: &'static str, code: i32) -> Result<i32> {
    if code < 0 {
        Err(HarnessError::Transport { operation, code })
    } else {
        Ok(code)
    }
}

/// Primitives offered by a bus transactor
///
/// Each call is a blocking round-trip: it returns only once the bus
/// transaction has completed. Implementations are not required to be
/// `Send` or `Sync`; a transactor is driven by one test run at a time.
///
/// # Bursts
///
/// The burst length is the length of the data slice. Incrementing bursts
/// advance the address by the access width after each beat; fixed bursts
/// keep every beat on `addr`.
pub trait Transactor {
    /// Protocol the transactor speaks
    fn protocol(&self) -> Protocol;

    /// Optional primitives this transactor provides
    ///
    /// The engine consults this before issuing any call so unsupported
    /// requests fail without touching the bus.
    fn capabilities(&self) -> Capabilities {
        self.protocol().capabilities()
    }

    /// Check that a burst of `beats` beats would be accepted
    ///
    /// The engine calls this once per test before building any payload, so
    /// an oversized burst fails the same way the first transfer would. The
    /// default accepts every length and leaves the check to the transfers.
    fn check_burst(&self, _beats: u32) -> Result<()> {
        Ok(())
    }

    /// Incrementing-address write of `data.len()` beats starting at `addr`
    fn write(&mut self, addr: u32, data: &[u32], width: AccessWidth) -> Result<()>;

    /// Incrementing-address read of `data.len()` beats starting at `addr`
    fn read(&mut self, addr: u32, data: &mut [u32], width: AccessWidth) -> Result<()>;

    /// Fixed-address write: every beat targets `addr`
    ///
    /// # Errors
    ///
    /// The default implementation rejects the call with
    /// [`HarnessError::FixedBurstUnsupported`].
    fn write_fixed(&mut self, _addr: u32, _data: &[u32], _width: AccessWidth) -> Result<()> {
        Err(HarnessError::FixedBurstUnsupported {
            protocol: self.protocol(),
        })
    }

    /// Fixed-address read: every beat samples `addr`
    ///
    /// # Errors
    ///
    /// The default implementation rejects the call with
    /// [`HarnessError::FixedBurstUnsupported`].
    fn read_fixed(&mut self, _addr: u32, _data: &mut [u32], _width: AccessWidth) -> Result<()> {
        Err(HarnessError::FixedBurstUnsupported {
            protocol: self.protocol(),
        })
    }

    /// Select the transactor's protocol mode
    ///
    /// # Returns
    ///
    /// The maximum burst length supported in that mode.
    fn set_protocol_mode(&mut self) -> Result<u32>;

    /// Drive the general-purpose output port (low 16 bits significant)
    fn gpio_out(&mut self, value: u32) -> Result<()>;

    /// Sample the general-purpose input port (low 16 bits significant)
    fn gpio_in(&mut self) -> Result<u32>;
}
