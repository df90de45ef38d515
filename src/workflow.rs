use crate::errors::ExportError;
use crate::exporter::{self, ExportReport};
use crate::file_scanner::{self, ExclusionRules};
use crate::selection::SelectionTree;
use crate::{cli, tui};
use anyhow::Result;
use chrono::Local;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Writes the rendered entries to stdout instead of a file.
fn print_dry_run(tree: &SelectionTree) -> Result<ExportReport> {
    if tree.checked_files().is_empty() {
        return Err(ExportError::NoSelection.into());
    }
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let report = exporter::write_entries(tree, &mut handle)?;
    handle.flush()?;
    Ok(report)
}

fn report_skipped(report: &ExportReport) {
    for (path, reason) in &report.skipped {
        eprintln!("⚠️  Skipped {}: {}", path.display(), reason);
    }
}

fn run_headless(tree: &SelectionTree, export_dir: &Path, dry_run: bool) -> Result<bool> {
    if dry_run {
        return match print_dry_run(tree) {
            Ok(report) => {
                report_skipped(&report);
                eprintln!("(Dry run: {} files rendered, nothing written.)", report.written);
                Ok(true)
            }
            Err(e) => {
                println!("{}", e);
                Ok(false)
            }
        };
    }

    match exporter::export_selection(tree, export_dir, Local::now()) {
        Ok(report) => {
            report_skipped(&report);
            if let Some(path) = &report.output_path {
                println!("✅ Exported {} files to {}", report.written, path.display());
            }
            Ok(true)
        }
        Err(ExportError::NoSelection) => {
            println!("No files selected.");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Main orchestrator: scan the project folder, let the user pick files
/// (or take everything with `--all`), then export.
///
/// Returns `Ok(false)` when nothing was exported because nothing was
/// selected, which `main` maps to a non-zero exit status.
pub fn run_fencepack(cli_args: cli::Cli) -> Result<bool> {
    let rules = ExclusionRules::with_extra(&cli_args.exclude_name, &cli_args.exclude_prefix);
    let export_dir = cli_args.export_dir();

    let tree = file_scanner::scan_tree(&cli_args.root, &rules)?;
    debug!(
        "{} entries, {} files checked initially",
        tree.len(),
        tree.checked_files().len()
    );

    if cli_args.all {
        return run_headless(&tree, &export_dir, cli_args.dry_run);
    }

    match tui::run_tui(tree, &cli_args.root, &export_dir, rules, cli_args.dry_run)? {
        Some(confirmed_tree) => run_headless(&confirmed_tree, &export_dir, true),
        None => {
            if cli_args.dry_run {
                warn!("Dry run cancelled before confirming a selection");
            }
            Ok(true)
        }
    }
}
