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

//! Memory verification harness for bus transactors
//!
//! This library drives a bus-functional-model transactor through a family of
//! memory tests: address counter and pseudo-random patterns, verified either
//! right after each write or after the whole window has been written, using
//! single beats or bursts.
//!
//! # Example
//!
//! ```
//! use bfm_memtest::core::engine::Engine;
//! use bfm_memtest::core::transactor::{MemoryModel, Protocol};
//! use bfm_memtest::core::window::AddressWindow;
//!
//! let mut model = MemoryModel::new(Protocol::Axi4);
//! let mut engine = Engine::new(&mut model);
//!
//! let result = engine.address_raw(AddressWindow::new(0, 0x100)).unwrap();
//! assert_eq!(result.to_string(), "MemTestAddrRAW 256 OK");
//! ```

pub mod core;
