use crate::errors::ExportError;
use crate::language::detect_language;
use crate::selection::SelectionTree;
use chrono::{DateTime, Local};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};
use tracing::{info, warn};

pub const OUTPUT_PREFIX: &str = "file_list";
const HEADER_RULE: &str = "========================================";
const PATH_RULE: &str = "----------------------------------------";

#[derive(Debug, Default)]
pub struct ExportReport {
    /// `None` when the entries went somewhere other than a file (dry run).
    pub output_path: Option<PathBuf>,
    pub written: usize,
    pub skipped: Vec<(PathBuf, String)>,
}

pub fn output_file_name(now: &DateTime<Local>) -> String {
    format!("{}_{}.txt", OUTPUT_PREFIX, now.format("%Y%m%d_%H%M%S"))
}

/// Relative path with `/` separators regardless of platform.
pub fn display_relative(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Text-mode newlines, no shebang line, exactly one trailing newline.
pub fn normalize_content(raw: &str) -> String {
    let text = raw.replace("\r\n", "\n");
    let body = if text.starts_with("#!") {
        match text.find('\n') {
            Some(end) => &text[end + 1..],
            None => "",
        }
    } else {
        text.as_str()
    };
    let mut out = body.trim_end_matches('\n').to_string();
    out.push('\n');
    out
}

pub fn render_entry(relative: &str, language: &str, content: &str) -> String {
    format!(
        "{}\nFile: {}\n{}\n```{}\n{}```\n\n",
        HEADER_RULE,
        relative,
        PATH_RULE,
        language,
        normalize_content(content)
    )
}

/// Writes one fenced entry per checked file, in tree order. Unreadable files
/// are reported and skipped.
pub fn write_entries<W: Write>(
    tree: &SelectionTree,
    out: &mut W,
) -> std::io::Result<ExportReport> {
    let mut report = ExportReport::default();

    for id in tree.checked_files() {
        let (Some(node), Some(relative)) = (tree.node(id), tree.relative_path(id)) else {
            continue;
        };
        let relative = display_relative(relative);

        let contents = match fs::read_to_string(&node.path) {
            Ok(c) => c,
            Err(e) => {
                warn!("Error reading {}: {}", relative, e);
                report.skipped.push((node.path.clone(), e.to_string()));
                continue;
            }
        };

        out.write_all(render_entry(&relative, detect_language(&node.path), &contents).as_bytes())?;
        report.written += 1;
    }

    Ok(report)
}

/// Exports the checked files of `tree` into a timestamped file in `dest_dir`.
/// The file is only created once the selection and destination are valid.
pub fn export_selection(
    tree: &SelectionTree,
    dest_dir: &Path,
    now: DateTime<Local>,
) -> Result<ExportReport, ExportError> {
    if tree.checked_files().is_empty() {
        return Err(ExportError::NoSelection);
    }
    if !dest_dir.is_dir() {
        return Err(ExportError::InvalidDestination(dest_dir.to_path_buf()));
    }

    let output_path = dest_dir.join(output_file_name(&now));
    let io_err = |source| ExportError::Io {
        path: output_path.clone(),
        source,
    };

    let file = File::create(&output_path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    let mut report = write_entries(tree, &mut writer).map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    info!(
        "Exported {} files to {} ({} skipped)",
        report.written,
        output_path.display(),
        report.skipped.len()
    );
    report.output_path = Some(output_path);
    Ok(report)
}
