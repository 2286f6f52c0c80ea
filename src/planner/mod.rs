//! Stack classification and plan assembly
//!
//! The planner is pure: it takes stack paths, an ordered [`PatternSet`] and the
//! declared [`Environments`], and produces a [`Plan`] without touching the
//! filesystem or process environment.
//!
//! Pattern order is the only ordering signal. A stack matching an earlier
//! pattern is assumed to be depended upon by stacks matching later patterns,
//! and by everything that matches no pattern at all.

pub mod classify;
pub mod environment;
pub mod glob;
pub mod patterns;
pub mod plan;
pub mod stack;

pub use classify::{classify, ClassificationResult};
pub use environment::{partition, Environment, Environments, Partition};
pub use glob::{GlobError, GlobMatcher};
pub use patterns::{PatternSet, DEFAULT_PATTERNS};
pub use plan::{EnvironmentPlan, OutputMode, Plan, PlanBuilder, Stage};
pub use stack::StackPath;
