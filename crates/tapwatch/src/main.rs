// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! tapwatch: follow a TAP stream and summarise it
//!
//! Reads a Test Anything Protocol report from a file or standard input,
//! optionally drawing live progress on stderr, and prints a summary to
//! stdout once the stream ends.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::error;

use tapwatch::config::{Config, OutputFormat};
use tapwatch::{driver, report};

fn main() -> ExitCode {
    let config = Config::parse();

    // Logs go to stderr; stdout carries the summary
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    match run(&config) {
        Ok(status) => ExitCode::from(status),
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(driver::EXIT_ERROR)
        }
    }
}

fn run(config: &Config) -> anyhow::Result<u8> {
    let summary = driver::run(config)?;

    let rendered = match config.format {
        OutputFormat::Text => report::render_text(&summary),
        OutputFormat::Json => {
            report::render_json(&summary).context("Failed to serialize summary")?
        }
    };
    print!("{rendered}");
    if config.format == OutputFormat::Json {
        println!();
    }

    Ok(driver::exit_status(&summary))
}
