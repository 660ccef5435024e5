//! Censor command implementation: one payload in, one payload out.

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use censor_core::{Censor, CensorConfig, CensorReport, DecodePolicy, MatchPolicy, Scope};

use crate::ui::diff_viewer;
use crate::ui::summary::{self, RunSummary};

/// Options for a single censor run, resolved from the command line.
#[derive(Debug, Default, Clone)]
pub struct CensorOptions {
    pub config_path: Option<PathBuf>,
    pub policy: Option<MatchPolicy>,
    pub strict_utf8: bool,
    pub path: Option<String>,
    pub output_path: Option<PathBuf>,
    pub summary: bool,
    pub json_summary: Option<PathBuf>,
    pub diff: bool,
    /// Colour the diff written to the output stream.
    pub stdout_color: bool,
    /// Colour the summary written to the error stream.
    pub stderr_color: bool,
}

impl CensorOptions {
    /// `--path` switches the run from stream mode to path-gated mode.
    pub fn scope(&self) -> Scope {
        if self.path.is_some() { Scope::PathGated } else { Scope::Always }
    }
}

/// Builds the effective configuration: defaults, then the config file, then flags.
pub fn resolve_config(opts: &CensorOptions) -> Result<CensorConfig> {
    let mut config = match &opts.config_path {
        Some(path) => CensorConfig::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => CensorConfig::load_default()?,
    };
    if let Some(policy) = opts.policy {
        config.policy = policy;
    }
    if opts.strict_utf8 {
        config.decode = DecodePolicy::Strict;
    }
    Ok(config)
}

/// Reads the whole payload from `input_file`, or from stdin when absent.
pub fn read_input(input_file: Option<&Path>) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    match input_file {
        Some(path) => {
            info!("Reading input from file: {}", path.display());
            data = fs::read(path).with_context(|| format!("Failed to read input file: {}", path.display()))?;
        }
        None => {
            io::stdin().lock().read_to_end(&mut data).context("Failed to read from stdin")?;
        }
    }
    Ok(data)
}

/// Censors `input` and writes the result (or a diff) to `out`, or to the
/// output file when one is set. Summaries go to `err`.
pub fn run_censor<W: Write, E: Write>(
    opts: &CensorOptions,
    input: &[u8],
    out: &mut W,
    err: &mut E,
) -> Result<CensorReport> {
    let config = resolve_config(opts)?;
    let policy = config.policy;
    let censor = Censor::new(config).context("Failed to build censor")?;
    let scope = opts.scope();

    let report = censor
        .apply(input, opts.path.as_deref(), scope)
        .context("Censoring failed")?;
    debug!(
        "Input {} byte(s), output {} byte(s), {} line(s) removed.",
        input.len(),
        report.output.len(),
        report.removed.len()
    );

    if let Some(path) = &opts.output_path {
        info!("Writing censored content to file: {}", path.display());
        fs::write(path, &report.output)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;
        if opts.diff {
            diff_viewer::print_diff(input, &report.output, out, opts.stdout_color)?;
        }
    } else if opts.diff {
        diff_viewer::print_diff(input, &report.output, out, opts.stdout_color)?;
    } else {
        out.write_all(&report.output)?;
    }
    out.flush()?;

    let run_summary = RunSummary {
        path: opts.path.as_deref(),
        scope,
        policy,
        engine: censor.engine().name(),
        report: &report,
    };
    if opts.summary {
        summary::print_summary(&run_summary, err, opts.stderr_color)?;
    }
    if let Some(path) = &opts.json_summary {
        summary::write_json_summary(&run_summary, path)?;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(opts: &CensorOptions, input: &[u8]) -> (Vec<u8>, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        run_censor(opts, input, &mut out, &mut err).unwrap();
        (out, String::from_utf8(err).unwrap())
    }

    #[test]
    fn default_options_filter_everything() {
        let (out, err) = run(&CensorOptions::default(), b"a\nconsole.log(\"x\")\nb");
        assert_eq!(out, b"a\nb");
        assert!(err.is_empty());
    }

    #[test]
    fn scope_follows_path_flag() {
        assert_eq!(CensorOptions::default().scope(), Scope::Always);
        let opts = CensorOptions { path: Some("x.ts".into()), ..CensorOptions::default() };
        assert_eq!(opts.scope(), Scope::PathGated);
    }

    #[test]
    fn flags_override_configuration() {
        let opts = CensorOptions {
            policy: Some(MatchPolicy::Substring),
            strict_utf8: true,
            ..CensorOptions::default()
        };
        let config = resolve_config(&opts).unwrap();
        assert_eq!(config.policy, MatchPolicy::Substring);
        assert_eq!(config.decode, DecodePolicy::Strict);
    }

    #[test_log::test]
    fn summary_goes_to_error_stream() {
        let opts = CensorOptions { summary: true, ..CensorOptions::default() };
        let (out, err) = run(&opts, b"console.error(1)\nkeep");
        assert_eq!(out, b"keep");
        assert!(err.contains("Removed 1 of 2 line(s)"));
    }

    #[test]
    fn strict_utf8_fails_on_bad_bytes() {
        let opts = CensorOptions { strict_utf8: true, ..CensorOptions::default() };
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = run_censor(&opts, b"\xff", &mut out, &mut err);
        assert!(format!("{:#}", result.unwrap_err()).contains("not valid UTF-8"));
        assert!(out.is_empty());
    }
}
