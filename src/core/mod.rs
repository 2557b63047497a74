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

//! Core harness components
//!
//! This module contains the verification harness:
//! - Transactor interface and reference memory model
//! - Pattern generation with deterministic replay
//! - Verification engine (immediate/deferred, single/burst, incrementing/fixed)
//! - Result reporting
//! - Configuration and suite runner

pub mod config;
pub mod engine;
pub mod error;
pub mod pattern;
pub mod report;
pub mod suite;
pub mod transactor;
pub mod width;
pub mod window;

// Re-export commonly used types
pub use config::HarnessConfig;
pub use engine::{Engine, MemTest};
pub use error::{HarnessError, Result};
pub use pattern::PatternStream;
pub use report::{report, SuiteReport, TestResult};
pub use suite::run_suite;
pub use transactor::{MemoryModel, Protocol, Transactor};
pub use width::AccessWidth;
pub use window::AddressWindow;
