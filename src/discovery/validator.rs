//! Deployable-stack detection
//!
//! A candidate directory counts as a stack according to the selected
//! [`StackValidator`] mode. Any filesystem error while checking means "not a
//! stack".

use crate::fs::FileSystem;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, trace};

/// Extension of infrastructure-definition files
pub const TERRAFORM_EXTENSION: &str = ".tf";

/// Text a definition file must contain for the strict mode to accept it
pub const BACKEND_S3_MARKER: &str = "backend \"s3\"";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StackValidator {
    /// Accept every candidate
    None,
    /// Accept directories holding at least one `.tf` file
    HasTf,
    /// Accept directories with a `.tf` file declaring an S3 backend
    #[default]
    BackendS3,
}

impl FromStr for StackValidator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "has-tf" => Ok(Self::HasTf),
            "backend-s3" | "" => Ok(Self::BackendS3),
            other => Err(format!(
                "Invalid stack validator '{}'. Valid options: none, has-tf, backend-s3",
                other
            )),
        }
    }
}

impl fmt::Display for StackValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::HasTf => write!(f, "has-tf"),
            Self::BackendS3 => write!(f, "backend-s3"),
        }
    }
}

impl StackValidator {
    pub fn is_valid_stack<F: FileSystem + ?Sized>(&self, fs: &F, dir: &Path) -> bool {
        if *self == Self::None {
            return true;
        }

        let tf_files = match terraform_files(fs, dir) {
            Some(files) if !files.is_empty() => files,
            _ => {
                trace!(dir = %dir.display(), "No definition files");
                return false;
            }
        };

        if *self == Self::HasTf {
            return true;
        }

        tf_files.iter().any(|file| match fs.read_to_string(file) {
            Ok(content) => content.contains(BACKEND_S3_MARKER),
            Err(e) => {
                debug!(file = %file.display(), error = %e, "Skipping unreadable file");
                false
            }
        })
    }
}

fn terraform_files<F: FileSystem + ?Sized>(fs: &F, dir: &Path) -> Option<Vec<PathBuf>> {
    match fs.read_dir(dir) {
        Ok(entries) => Some(
            entries
                .into_iter()
                .filter(|e| e.is_file() && e.file_name().ends_with(TERRAFORM_EXTENSION))
                .map(|e| e.path)
                .collect(),
        ),
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "Cannot list candidate directory");
            None
        }
    }
}
