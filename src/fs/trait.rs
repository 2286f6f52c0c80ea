//! FileSystem trait definition

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Directory names never descended into when walking a tree
pub const SKIPPED_DIRS: &[&str] = &[".git", ".terraform", "node_modules"];

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
    Symlink,
}

/// A directory entry returned by read_dir
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub file_type: FileType,
}

impl DirEntry {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.name
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn is_file(&self) -> bool {
        self.file_type == FileType::File
    }

    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }
}

/// Abstraction over file system operations for testability
pub trait FileSystem: Send + Sync {
    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// List directory contents
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    /// Every directory strictly below `root`, depth-first, skipping [`SKIPPED_DIRS`].
    ///
    /// Unreadable subdirectories are skipped; only a failure to read `root`
    /// itself is reported.
    fn walk_dirs(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        let mut pending = vec![root.to_path_buf()];
        let mut first = true;

        while let Some(dir) = pending.pop() {
            let entries = match self.read_dir(&dir) {
                Ok(entries) => entries,
                Err(e) if first => return Err(e),
                Err(_) => continue,
            };
            first = false;

            for entry in entries {
                if !entry.is_dir() || SKIPPED_DIRS.contains(&entry.file_name()) {
                    continue;
                }
                found.push(entry.path.clone());
                pending.push(entry.path);
            }
        }

        found.sort();
        Ok(found)
    }
}
