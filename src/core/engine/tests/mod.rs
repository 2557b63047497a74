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

//! Verification engine tests
//!
//! This module contains tests for the verification engine, organized into
//! logical categories:
//!
//! - `immediate`: read-after-write strategies
//! - `deferred`: write-all-then-read-all strategies
//! - `burst`: multi-beat strategies and their single-beat equivalence
//! - `fixed`: fixed-address bursts and their rejection
//! - `errors`: configuration and transport failures
//! - `properties`: property-based round-trip and fault-injection checks
//! - `helpers`: common test utilities

use super::*;
use crate::core::transactor::{MemoryModel, Protocol};

mod fixed;
mod helpers;
