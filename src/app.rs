use crate::cli::{Cli, OutputFormat};
use crate::errors::IncludeGraphError;
use crate::graph::{IncludeGraph, ScanOptions};
use crate::query::{DanglingQuery, Query};
use crate::utils::{config, paths};
use crate::visualization::{DotGenerator, JsonReport, TreeRenderer, View};
use clap::CommandFactory;
use clap_complete::generate;
use std::io;
use std::path::PathBuf;

/// Effective settings after merging flags, the config file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub root: PathBuf,
    pub base: PathBuf,
    pub scan: ScanOptions,
    pub view: View,
    pub format: OutputFormat,
}

/// Merge command-line flags with the configuration file.
///
/// Explicit flags win over the config file, which wins over built-in defaults.
/// Boolean settings have a `--no-` flag so a config value can be turned off.
/// A config file named with `--config` must parse; one found next to the root
/// is skipped with a warning when it does not.
///
/// # Errors
/// Returns `IncludeGraphError::Config` for an invalid `--config` file and
/// `IncludeGraphError::Io` if the current directory cannot be determined.
pub fn resolve_settings(cli: &Cli) -> Result<Settings, IncludeGraphError> {
    let root = paths::resolve(&cli.root);

    let cfg = match cli.config.as_ref() {
        Some(p) => config::load_config_at(p)?,
        None => match config::load_config_near(&root) {
            Some(Ok(cfg)) => cfg,
            Some(Err(e)) => {
                if !cli.quiet {
                    eprintln!("Warning: ignoring {e}");
                }
                config::Config::default()
            }
            None => config::Config::default(),
        },
    };
    let scan_cfg = cfg.scan.unwrap_or_default();
    let out_cfg = cfg.output.unwrap_or_default();

    let mut scan = ScanOptions::default();
    if let Some(ext) = cli.ext.clone().or(scan_cfg.extension) {
        scan.extension = ext.trim_start_matches('.').to_string();
    }
    scan.respect_ignore =
        switch(cli.respect_ignore, cli.no_respect_ignore).or(scan_cfg.respect_ignore).unwrap_or(false);

    let reverse = switch(cli.reverse, cli.no_reverse).or(out_cfg.reverse).unwrap_or(false);
    let view = if reverse { View::Reverse } else { View::Normal };

    let format = match cli.format {
        Some(f) => f,
        None => match out_cfg.format.as_deref() {
            None => OutputFormat::Text,
            Some(name) => OutputFormat::from_name(name).ok_or_else(|| IncludeGraphError::Config {
                path: cli.config.clone().unwrap_or_else(|| config::default_config_path(&root)),
                message: format!("unknown output format {name:?} (expected text, json or dot)"),
            })?,
        },
    };

    let base = match cli.base.as_ref() {
        Some(b) => paths::resolve(b),
        None => paths::resolve(&std::env::current_dir()?),
    };

    Ok(Settings { root, base, scan, view, format })
}

// `--flag` / `--no-flag` pair; `None` when neither was given.
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

/// Build the graph and produce the requested output, without printing it.
///
/// # Errors
/// Returns any `IncludeGraphError` raised while scanning, rendering or encoding.
pub fn execute(settings: &Settings, quiet: bool, verbose: u8) -> Result<String, IncludeGraphError> {
    if verbose > 0 {
        eprintln!("Using root: {}", settings.root.display());
    }
    let graph = IncludeGraph::build_from_directory_opts(&settings.root, &settings.scan)?;

    if !quiet {
        for (file, reason) in &graph.unreadable {
            eprintln!("Warning: cannot read {}: {reason}", file.display());
        }
    }
    if verbose > 0 {
        eprintln!(
            "Scanned {} .{} documents, {} includes",
            graph.len(),
            settings.scan.extension,
            graph.edge_count()
        );
    }
    if verbose > 1 {
        for (from, to) in DanglingQuery::new().run(&graph) {
            eprintln!("Dangling include: {} -> {}", from.display(), to.display());
        }
    }

    match settings.format {
        OutputFormat::Text => TreeRenderer::new(settings.base.clone()).render(&graph, settings.view),
        OutputFormat::Json => {
            let mut s = JsonReport::build(&graph, settings.view, &settings.base)?.to_json_pretty()?;
            s.push('\n');
            Ok(s)
        }
        OutputFormat::Dot => DotGenerator::new().generate_dot(&graph, settings.view, &settings.base),
    }
}

/// Run the CLI logic in-process.
///
/// Returns an exit code (0 = success, 1 = error reported on stderr).
#[must_use]
pub fn run_cli(cli: Cli) -> i32 {
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let bin_name = env!("CARGO_PKG_NAME");
        generate(shell, &mut cmd, bin_name, &mut io::stdout());
        return 0;
    }

    let settings = match resolve_settings(&cli) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };
    match execute(&settings, cli.quiet, cli.verbose) {
        Ok(out) => {
            print!("{out}");
            0
        }
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}
