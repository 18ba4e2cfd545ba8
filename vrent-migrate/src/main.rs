// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

#[macro_use]
extern crate tracing;

mod args;
mod commands;
mod exit_code;
mod opt;

use clap::Parser;
use color_eyre::Result;
use opt::Opt;
use vrent_logging::{Level, LogBuilder, WorkerGuard};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Variables already set in the environment take precedence over the .env file.
    if let Err(err) = dotenv::dotenv() {
        if !err.not_found() {
            eprintln!("Ignoring unreadable .env file: {err}");
        }
    }

    let opt = Opt::parse();
    let log_appender_guard = init_logging(&opt)?;

    info!("vrent-migrate {} started", env!("CARGO_PKG_VERSION"));

    let result = commands::handle_subcommand(opt).await;

    // Flush buffered logs before a possible early exit.
    drop(log_appender_guard);

    if let Err((err, exit_code)) = result {
        eprintln!("{err:?}");
        std::process::exit(exit_code);
    }

    Ok(())
}

/// Returns the guard flushing file logs, to be held until exit.
fn init_logging(opt: &Opt) -> Result<Option<WorkerGuard>> {
    let logging_targets = vec![
        ("vrent_evm".to_string(), Level::INFO),
        ("vrent_logging".to_string(), Level::INFO),
        ("vrent_migrate".to_string(), Level::INFO),
    ];
    let mut log_builder = LogBuilder::new(logging_targets);
    log_builder.output_dest(opt.log_output_dest.clone());
    if let Some(format) = opt.log_format {
        log_builder.format(format);
    }

    let (_reload_handle, log_appender_guard) = log_builder.initialize()?;
    Ok(log_appender_guard)
}
