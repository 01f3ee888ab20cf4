// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `list` and `count` command implementation.

use std::io::Write;

use xcreport::cli::{Cli, OutputFormat, ReportArgs};
use xcreport::config::{self, Config};
use xcreport::discovery;
use xcreport::error::ExitCode;
use xcreport::format::{self, View};
use xcreport::parallel::TaskGroup;
use xcreport::pipeline;

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let cwd = std::env::current_dir()?;
    match discovery::resolve_config(cli.config.as_deref(), &cwd)? {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            Ok(config::load_with_warnings(&path)?)
        }
        None => {
            tracing::debug!("no config found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Build the report and print it.
pub fn run(cli: &Cli, args: &ReportArgs, view: View) -> anyhow::Result<ExitCode> {
    let mut config = load_config(cli)?;
    let options = args.format_options(&config);
    config.merge.filter_devices = options.filter_devices;

    if args.compact && args.output != OutputFormat::Json {
        eprintln!("xcreport: warning: --compact only applies to JSON output, ignoring");
    }

    let group = TaskGroup::new(args.jobs)?;
    tracing::trace!("reading inputs with {} workers", group.workers());
    let inputs = args.input_paths().read(&group)?;
    let report = pipeline::build_report(&inputs, &config)?;

    let formatter = format::create_formatter(view, args.output, options);
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    formatter.format_to(&mut handle, &report)?;
    handle.flush()?;

    Ok(ExitCode::Success)
}
