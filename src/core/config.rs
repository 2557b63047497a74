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

//! Harness configuration
//!
//! A run is described by a TOML file listing the connection, the protocol
//! and the tests to perform in order:
//!
//! ```toml
//! cid = 0
//! protocol = "axi4"
//!
//! [[test]]
//! kind = "address_raw"
//! start = 0x0
//! length = 0x100
//!
//! [[test]]
//! kind = "burst"
//! start = 0x0
//! length = 0x40
//! burst_length = 16
//! fixed = false
//! ```
//!
//! Without a file, [`HarnessConfig::default`] runs the stock sequence.

use super::engine::{MemTest, SEED_BURST, SEED_RANDOM, SEED_RANDOM_RAW};
use super::error::{HarnessError, Result};
use super::transactor::Protocol;
use super::width::AccessWidth;
use super::window::AddressWindow;
use log::debug;
use serde::Deserialize;
use std::path::Path;

/// Which stock test an entry runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    AddressRaw,
    Address,
    RandomRaw,
    Random,
    BurstRaw,
    Burst,
}

impl TestKind {
    /// Seed used when the entry does not name one
    pub fn default_seed(self) -> Option<u64> {
        match self {
            TestKind::AddressRaw | TestKind::Address => None,
            TestKind::RandomRaw => Some(SEED_RANDOM_RAW),
            TestKind::Random => Some(SEED_RANDOM),
            TestKind::BurstRaw | TestKind::Burst => Some(SEED_BURST),
        }
    }
}

/// One `[[test]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestEntry {
    pub kind: TestKind,
    pub start: u32,
    pub length: u32,
    /// Bytes per beat; anything but 1 or 2 means 4. Counter tests are
    /// always word-wide and ignore it.
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default = "default_burst_length")]
    pub burst_length: u32,
    #[serde(default)]
    pub fixed: bool,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub label: Option<String>,
}

fn default_burst_length() -> u32 {
    1
}

impl TestEntry {
    pub fn new(kind: TestKind, start: u32, length: u32) -> Self {
        Self {
            kind,
            start,
            length,
            width: None,
            burst_length: default_burst_length(),
            fixed: false,
            seed: None,
            label: None,
        }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_burst_length(mut self, length: u32) -> Self {
        self.burst_length = length;
        self
    }

    pub fn window(&self) -> AddressWindow {
        AddressWindow::new(self.start, self.length)
    }

    /// Build the engine descriptor for this entry
    pub fn to_mem_test(&self) -> MemTest {
        let width = self.width.unwrap_or(4);
        let mut test = match self.kind {
            TestKind::AddressRaw => MemTest::address_raw(),
            TestKind::Address => MemTest::address(),
            TestKind::RandomRaw => MemTest::random_raw(width),
            TestKind::Random => MemTest::random(width),
            TestKind::BurstRaw => MemTest::burst_raw(self.burst_length),
            TestKind::Burst => MemTest::burst(self.burst_length),
        };

        match (self.kind, self.width) {
            (TestKind::AddressRaw | TestKind::Address, Some(width)) => {
                debug!("Ignoring width {} for {:?} counter test", width, self.kind);
            }
            (_, Some(_)) => test = test.with_width(AccessWidth::from_bytes(width)),
            (_, None) => {}
        }
        if let Some(seed) = self.seed.or(self.kind.default_seed()) {
            test = test.with_seed(seed);
        }
        if self.fixed {
            test = test.with_fixed_address();
        }
        if let Some(label) = &self.label {
            test = test.with_label(label.clone());
        }
        test
    }
}

/// Complete harness configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// Connection (card) id
    #[serde(default)]
    pub cid: u32,

    #[serde(default)]
    pub protocol: Protocol,

    #[serde(rename = "test", default)]
    pub tests: Vec<TestEntry>,
}

impl Default for HarnessConfig {
    /// The stock sequence: counter tests and word random tests over the
    /// first 256 bytes, then two 64-byte burst tests
    fn default() -> Self {
        Self {
            cid: 0,
            protocol: Protocol::Axi4,
            tests: vec![
                TestEntry::new(TestKind::AddressRaw, 0, 0x100),
                TestEntry::new(TestKind::Address, 0, 0x100),
                TestEntry::new(TestKind::RandomRaw, 0, 0x100).with_width(4),
                TestEntry::new(TestKind::Random, 0, 0x100).with_width(4),
                TestEntry::new(TestKind::BurstRaw, 0, 4 * 8 * 2).with_burst_length(8),
                TestEntry::new(TestKind::Burst, 0, 4 * 8 * 2).with_burst_length(16),
            ],
        }
    }
}

impl HarnessConfig {
    /// Parse a TOML document
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or lists no tests.
    ///
    /// # Example
    ///
    /// ```
    /// use bfm_memtest::core::config::{HarnessConfig, TestKind};
    ///
    /// let config = HarnessConfig::parse(r#"
    ///     cid = 1
    ///     [[test]]
    ///     kind = "random_raw"
    ///     start = 0x1000
    ///     length = 0x100
    ///     width = 2
    /// "#).unwrap();
    ///
    /// assert_eq!(config.cid, 1);
    /// assert_eq!(config.tests[0].kind, TestKind::RandomRaw);
    /// ```
    pub fn parse(data: &str) -> Result<Self> {
        let config: HarnessConfig = toml::from_str(data)?;
        if config.tests.is_empty() {
            return Err(HarnessError::Config("no tests configured".to_string()));
        }
        Ok(config)
    }

    /// Load a TOML configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::parse(&data)
    }
}
