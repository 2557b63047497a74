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

use bfm_memtest::core::config::HarnessConfig;
use bfm_memtest::core::error::Result;
use bfm_memtest::core::suite::run_suite;
use bfm_memtest::core::transactor::{MemoryModel, Protocol};
use clap::{Parser, ValueEnum};
use log::{error, info};
use std::path::PathBuf;

/// Memory test harness for AMBA bus transactors
#[derive(Parser)]
#[command(name = "bfm-memtest")]
#[command(about = "Memory verification over a bus transactor", long_about = None)]
struct Args {
    /// Connection (card) id; overrides the config file
    #[arg(short = 'c', long)]
    cid: Option<u32>,

    /// TOML file listing the tests to run (defaults to the stock sequence)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bus protocol; overrides the config file
    #[arg(short = 'p', long, value_enum)]
    protocol: Option<ProtocolArg>,

    /// Corrupt reads of the byte at this address (simulated backend only)
    #[arg(long = "fault", value_parser = parse_address)]
    faults: Vec<u32>,

    /// Cap the burst length accepted by the simulated backend
    #[arg(long)]
    max_burst: Option<u32>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProtocolArg {
    Ahb,
    Axi4,
}

impl From<ProtocolArg> for Protocol {
    fn from(arg: ProtocolArg) -> Self {
        match arg {
            ProtocolArg::Ahb => Protocol::Ahb,
            ProtocolArg::Axi4 => Protocol::Axi4,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Accept decimal or `0x`-prefixed hexadecimal addresses
fn parse_address(arg: &str) -> std::result::Result<u32, String> {
    let parsed = match arg.strip_prefix("0x").or_else(|| arg.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => arg.parse(),
    };
    parsed.map_err(|e| format!("invalid address '{}': {}", arg, e))
}

fn main() -> Result<()> {
    // Load .env file if present (e.g. RUST_LOG)
    if let Err(e) = dotenvy::dotenv() {
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Initialize logger with default level INFO
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("bfm-memtest v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            HarnessConfig::load(path).inspect_err(|e| {
                error!("Failed to load configuration: {}", e);
            })?
        }
        None => HarnessConfig::default(),
    };
    if let Some(cid) = args.cid {
        config.cid = cid;
    }
    if let Some(protocol) = args.protocol {
        config.protocol = protocol.into();
    }

    let mut transactor = MemoryModel::open(config.cid, config.protocol).inspect_err(|e| {
        error!("{} for CID: {}", e, config.cid);
    })?;
    if let Some(max) = args.max_burst {
        transactor = transactor.with_max_burst(max);
    }
    for &addr in &args.faults {
        info!("Injecting read fault at 0x{:08X}", addr);
        transactor.corrupt_read(addr);
    }

    info!("Connected to simulated card {} ({})", transactor.cid(), config.protocol);

    let report = run_suite(&mut transactor, &config).inspect_err(|e| {
        error!("Test run aborted: {}", e);
    })?;

    match args.format {
        Format::Text => print!("{}", report.to_text()),
        Format::Json => println!("{}", report.to_json()?),
    }

    if report.passed() {
        info!("All tests passed");
    } else {
        info!("{} mismatch(es) in total", report.total_mismatches());
    }
    Ok(())
}
