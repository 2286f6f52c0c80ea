use super::{DirEntry, FileSystem, FileType, SKIPPED_DIRS};
use anyhow::{bail, Context, Result};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for RealFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).context(format!("Failed to read file {:?}", path))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let entries = fs::read_dir(path).context(format!("Failed to read directory {:?}", path))?;

        let mut result = Vec::new();
        for entry in entries {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            let file_type = if path.is_file() {
                FileType::File
            } else if path.is_dir() {
                FileType::Directory
            } else {
                FileType::Symlink
            };

            result.push(DirEntry {
                path,
                name,
                file_type,
            });
        }

        Ok(result)
    }

    fn walk_dirs(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            bail!("Not a directory: {:?}", root);
        }

        let mut found = Vec::new();
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .filter_entry(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .map(|name| !SKIPPED_DIRS.contains(&name))
                    .unwrap_or(true)
            })
            .build();

        for result in walker {
            let entry = match result {
                Ok(e) => e,
                Err(err) => {
                    debug!(error = %err, "Skipping unreadable entry");
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }
            if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                found.push(entry.into_path());
            }
        }

        found.sort();
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::create_dir_all(base.join("stacks/dev/networking")).unwrap();
        fs::create_dir_all(base.join("stacks/dev/networking/.terraform/providers")).unwrap();
        fs::create_dir_all(base.join(".git/objects")).unwrap();
        fs::File::create(base.join("stacks/dev/networking/main.tf"))
            .unwrap()
            .write_all(b"terraform {}")
            .unwrap();
        fs::File::create(base.join("README.md"))
            .unwrap()
            .write_all(b"readme")
            .unwrap();

        dir
    }

    #[test]
    fn test_is_dir() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        assert!(fs.is_dir(temp.path()));
        assert!(fs.is_dir(&temp.path().join("stacks/dev")));
        assert!(!fs.is_dir(&temp.path().join("README.md")));
        assert!(!fs.is_dir(&temp.path().join("nonexistent")));
    }

    #[test]
    fn test_read_to_string() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let content = fs
            .read_to_string(&temp.path().join("stacks/dev/networking/main.tf"))
            .unwrap();
        assert_eq!(content, "terraform {}");
    }

    #[test]
    fn test_read_dir() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let entries = fs.read_dir(&temp.path().join("stacks/dev/networking")).unwrap();
        let main = entries.iter().find(|e| e.file_name() == "main.tf").unwrap();
        assert!(main.is_file());
        let dot = entries.iter().find(|e| e.file_name() == ".terraform").unwrap();
        assert!(dot.is_dir());
    }

    #[test]
    fn test_read_dir_missing() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        assert!(fs.read_dir(&temp.path().join("missing")).is_err());
    }

    #[test]
    fn test_walk_dirs_skips_tool_directories() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let dirs: Vec<PathBuf> = fs
            .walk_dirs(temp.path())
            .unwrap()
            .into_iter()
            .map(|p| p.strip_prefix(temp.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            dirs,
            vec![
                PathBuf::from("stacks"),
                PathBuf::from("stacks/dev"),
                PathBuf::from("stacks/dev/networking"),
            ]
        );
    }

    #[test]
    fn test_walk_dirs_missing_root() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        assert!(fs.walk_dirs(&temp.path().join("missing")).is_err());
    }
}
