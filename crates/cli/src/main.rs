// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! xcreport CLI entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt};

use xcreport::cli::{Cli, Command};
use xcreport::error::ExitCode;
use xcreport::format::View;

mod cmd_report;

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("XCREPORT_LOG").unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("xcreport: {}", e);
            match e.downcast_ref::<xcreport::Error>() {
                Some(err) => ExitCode::from(err),
                None => ExitCode::InternalError,
            }
        }
    };

    std::process::exit(exit_code as i32);
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            // Show help for bare invocation
            Cli::command().print_help()?;
            println!();
            Ok(ExitCode::Success)
        }
        Some(Command::List(args)) => cmd_report::run(&cli, args, View::List),
        Some(Command::Count(args)) => cmd_report::run(&cli, args, View::Count),
    }
}
