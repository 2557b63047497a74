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

/// Harness error types
use thiserror::Error;

use super::transactor::Protocol;

/// Result type for harness operations
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Main error type for the harness
///
/// Data mismatches are never reported through this type; they are counted
/// in [`TestResult`](crate::core::report::TestResult). An error means the
/// run could not be carried out at all.
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Fixed-address bursts are not supported by the {protocol} transactor")]
    FixedBurstUnsupported { protocol: Protocol },

    #[error("Misaligned window: start 0x{start:08X} length {length} (access unit {unit} bytes)")]
    MisalignedWindow { start: u32, length: u32, unit: u32 },

    #[error("Window 0x{start:08X}+{length} runs past the 32-bit address space")]
    WindowOverflow { start: u32, length: u32 },

    #[error("Invalid burst length: {0} (must be at least 1)")]
    InvalidBurstLength(u32),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transactor {operation} failed with code {code}")]
    Transport { operation: &'static str, code: i32 },

    #[error("Burst length {length} exceeds transactor maximum {max}")]
    BurstTooLong { length: u32, max: u32 },

    #[error("Transactor not connected (cid {0})")]
    NotConnected(u32),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HarnessError {
    /// Whether the error stems from a bad request rather than the transactor
    ///
    /// Configuration errors are raised before any interface call is made.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            HarnessError::FixedBurstUnsupported { .. }
                | HarnessError::MisalignedWindow { .. }
                | HarnessError::WindowOverflow { .. }
                | HarnessError::InvalidBurstLength(_)
                | HarnessError::Config(_)
                | HarnessError::Toml(_)
        )
    }

    /// Whether the error was reported by the transactor itself
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            HarnessError::Transport { .. }
                | HarnessError::BurstTooLong { .. }
                | HarnessError::NotConnected(_)
        )
    }
}
