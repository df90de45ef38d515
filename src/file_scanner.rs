use crate::errors::ScanError;
use crate::selection::{NodeId, SelectionTree};
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

pub const DEFAULT_EXCLUDED_NAMES: &[&str] = &["prompt.txt"];
pub const DEFAULT_EXCLUDED_PREFIXES: &[&str] = &["file_list", "key", "api_key"];

/// File-name filters applied while scanning. Keeps previous exports and
/// credential files out of the tree. Directories are never excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRules {
    names: Vec<String>,
    prefixes: Vec<String>,
}

impl Default for ExclusionRules {
    fn default() -> Self {
        ExclusionRules::new(
            DEFAULT_EXCLUDED_NAMES.iter().copied(),
            DEFAULT_EXCLUDED_PREFIXES.iter().copied(),
        )
    }
}

impl ExclusionRules {
    pub fn new<N, P>(names: N, prefixes: P) -> Self
    where
        N: IntoIterator,
        N::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        ExclusionRules {
            names: names.into_iter().map(|n| n.as_ref().to_lowercase()).collect(),
            prefixes: prefixes
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Defaults plus any extra names/prefixes given on the command line.
    pub fn with_extra(names: &[String], prefixes: &[String]) -> Self {
        let defaults = ExclusionRules::default();
        ExclusionRules::new(
            defaults.names.iter().chain(names.iter()),
            defaults.prefixes.iter().chain(prefixes.iter()),
        )
    }

    pub fn excludes(&self, file_name: &str) -> bool {
        let name = file_name.to_lowercase();
        self.names.iter().any(|n| *n == name) || self.prefixes.iter().any(|p| name.starts_with(p))
    }
}

/// Walks `root` into a fully checked `SelectionTree`, children sorted by
/// name at every level.
pub fn scan_tree(root: &Path, rules: &ExclusionRules) -> Result<SelectionTree, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let mut tree = SelectionTree::new(root);
    // dir_stack[d] is the node id of the directory currently open at depth d.
    let mut dir_stack: Vec<NodeId> = vec![0];

    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for result in walker {
        let dirent = match result {
            Ok(v) => v,
            Err(e) => {
                warn!("Skipping entry during scan: {}", e);
                continue;
            }
        };

        let depth = dirent.depth();
        if depth > dir_stack.len() {
            // Parent directory was skipped, so is this entry.
            continue;
        }
        dir_stack.truncate(depth);
        let Some(&parent) = dir_stack.last() else {
            continue;
        };

        let is_dir = dirent.file_type().is_dir();
        if !is_dir && rules.excludes(&dirent.file_name().to_string_lossy()) {
            debug!("Excluded {}", dirent.path().display());
            continue;
        }

        if let Some(id) = tree.add_child(parent, dirent.into_path(), is_dir) {
            if is_dir {
                dir_stack.push(id);
            }
        }
    }

    debug!("Scanned {} entries under {}", tree.len(), root.display());
    Ok(tree)
}
