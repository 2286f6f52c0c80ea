//! Candidate stack derivation
//!
//! Candidates come either from a list of changed files (their parent
//! directories) or from glob filters expanded against the directory tree.
//! Both produce a sorted, de-duplicated list.

use crate::fs::FileSystem;
use crate::planner::{GlobMatcher, StackPath};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};

/// Directory name whose contents belong to the enclosing stack
pub const BOILERPLATE_DIR: &str = ".boilerplate";

/// Parent directories of the changed files.
///
/// Files at the repository root have no stack and are dropped. A file inside
/// a `.boilerplate` directory is attributed to the directory above it.
pub fn from_changed_files<S: AsRef<str>>(files: &[S]) -> Vec<StackPath> {
    let dirs: BTreeSet<StackPath> = files
        .iter()
        .filter_map(|file| StackPath::new(file.as_ref()))
        .filter_map(|file| file.parent())
        .filter_map(|dir| {
            if dir.name() == BOILERPLATE_DIR {
                dir.parent()
            } else {
                Some(dir)
            }
        })
        .collect();

    dirs.into_iter().collect()
}

/// Directories under `root` whose root-relative path matches any filter.
///
/// Invalid filters are skipped; an unreadable root yields no candidates.
pub fn from_glob_filters<F, S>(fs: &F, root: &Path, filters: &[S]) -> Vec<StackPath>
where
    F: FileSystem + ?Sized,
    S: AsRef<str>,
{
    let matchers: Vec<GlobMatcher> = filters
        .iter()
        .filter_map(|filter| match GlobMatcher::compile(filter.as_ref().trim()) {
            Ok(m) => Some(m),
            Err(e) => {
                warn!(error = %e, "Ignoring glob filter");
                None
            }
        })
        .collect();

    if matchers.is_empty() {
        return Vec::new();
    }

    let dirs = match fs.walk_dirs(root) {
        Ok(dirs) => dirs,
        Err(e) => {
            warn!(root = %root.display(), error = %e, "Cannot walk directory tree");
            return Vec::new();
        }
    };

    let mut found = BTreeSet::new();
    for dir in dirs {
        let Some(relative) = relative_stack_path(root, &dir) else {
            continue;
        };
        if matchers.iter().any(|m| m.test(relative.as_str())) {
            debug!(path = %relative, "Glob filter matched directory");
            found.insert(relative);
        }
    }

    found.into_iter().collect()
}

fn relative_stack_path(root: &Path, dir: &Path) -> Option<StackPath> {
    let relative = dir.strip_prefix(root).ok()?;
    let joined = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    StackPath::new(&joined)
}
