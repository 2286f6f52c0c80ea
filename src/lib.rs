//! stackplan - deployment-order planner for infrastructure-as-code stacks
//!
//! Given the files changed in a commit (or glob filters over the repository),
//! stackplan works out which stack directories need deploying, splits them by
//! environment, and orders each environment's stacks into a sequential stage
//! and a parallel stage.
//!
//! # Core Concepts
//!
//! - **Stack**: a directory holding one independently deployable unit
//! - **Priority patterns**: ordered globs; a stack matching one joins the
//!   sequential stage, in pattern order, first match wins
//! - **Environment**: a name plus the path prefix its stacks live under
//!
//! # Example Usage
//!
//! ```
//! use stackplan::planner::{classify, PatternSet, StackPath};
//!
//! let patterns = PatternSet::new(["**/networking", "**/iam"]).unwrap();
//! let stacks: Vec<StackPath> = ["dev/app", "dev/iam", "dev/networking"]
//!     .iter()
//!     .filter_map(|p| StackPath::new(p))
//!     .collect();
//!
//! let result = classify(&stacks, &patterns);
//! assert_eq!(result.sequential[0].as_str(), "dev/networking");
//! assert_eq!(result.parallel[0].as_str(), "dev/app");
//! ```
//!
//! # Project Structure
//!
//! - [`planner`]: glob matching, classification, environment partitioning
//! - [`discovery`]: candidate derivation and stack validation
//! - [`service`]: the end-to-end planning run
//! - [`config`]: environment-variable and flag configuration

pub mod cli;
pub mod config;
pub mod discovery;
pub mod fs;
pub mod planner;
pub mod service;
pub mod util;

pub use config::{ConfigError, PlannerConfig, RawOptions};
pub use discovery::StackValidator;
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use planner::{
    classify, ClassificationResult, Environments, OutputMode, PatternSet, Plan, PlanBuilder,
    StackPath,
};
pub use service::{PlanReport, PlanningService};
pub use util::{init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "stackplan");
    }
}
