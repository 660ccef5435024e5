// censor/src/main.rs
//! Censor entry point.
//!
//! Reads the payload, runs the censor, writes the result. Without flags this
//! is a pure stdin to stdout filter.

use anyhow::Result;
use clap::Parser;
use is_terminal::IsTerminal;
use log::LevelFilter;
use std::io;

use censor::cli::Cli;
use censor::commands::censor::{read_input, run_censor, CensorOptions};
use censor::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.quiet {
        logger::init_logger(Some(LevelFilter::Off));
    } else if cli.debug {
        logger::init_logger(Some(LevelFilter::Debug));
    } else {
        logger::init_logger(None);
    }

    let input = read_input(cli.input_file.as_deref())?;

    let stdout = io::stdout();
    let stdout_color = stdout.is_terminal();
    let stderr_color = io::stderr().is_terminal();
    let opts = CensorOptions {
        config_path: cli.config,
        policy: cli.policy.map(Into::into),
        strict_utf8: cli.strict_utf8,
        path: cli.path,
        output_path: cli.output,
        summary: cli.summary,
        json_summary: cli.json_summary,
        diff: cli.diff,
        stdout_color,
        stderr_color,
    };

    let mut out = stdout.lock();
    let mut err = io::stderr().lock();
    run_censor(&opts, &input, &mut out, &mut err)?;
    Ok(())
}
