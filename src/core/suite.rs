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

//! Suite runner
//!
//! Brings a transactor up and runs every configured test against it:
//!
//! 1. Select the protocol mode (if the transactor supports it) and record the
//!    maximum burst length
//! 2. Drive GPIO output low and sample GPIO input (if available)
//! 3. Run each test in configuration order
//!
//! Any error from the transactor aborts the suite; no partial report is
//! returned.

use super::config::HarnessConfig;
use super::engine::Engine;
use super::error::Result;
use super::report::SuiteReport;
use super::transactor::{Capabilities, Transactor};
use log::{debug, info};

/// Run the configured tests against `transactor`
pub fn run_suite<T: Transactor + ?Sized>(
    transactor: &mut T,
    config: &HarnessConfig,
) -> Result<SuiteReport> {
    let mut report = SuiteReport::new(config.cid, transactor.protocol());
    let capabilities = transactor.capabilities();

    if capabilities.contains(Capabilities::PROTOCOL_SELECT) {
        let max_burst = transactor.set_protocol_mode()?;
        info!("{} burst length: {}", report.protocol, max_burst);
        report.max_burst = Some(max_burst);
    }

    if capabilities.contains(Capabilities::GPIO) {
        transactor.gpio_out(0)?;
        let value = transactor.gpio_in()? & 0xFFFF;
        debug!("GPIO in: 0x{:04X}", value);
        report.gpio_in = Some(value);
    }

    let mut engine = Engine::new(transactor);
    for entry in &config.tests {
        let test = entry.to_mem_test();
        let result = engine.run(&test, entry.window())?;
        report.results.push(result);
    }

    info!(
        "{} test(s), {} mismatch(es)",
        report.results.len(),
        report.total_mismatches()
    );
    Ok(report)
}
