//! Planning service
//!
//! Wires discovery, validation and plan assembly together. The service owns
//! the filesystem handle; everything else arrives through [`PlannerConfig`].

use crate::config::{ConfigError, PlannerConfig};
use crate::discovery::{from_changed_files, from_glob_filters};
use crate::fs::FileSystem;
use crate::planner::{Plan, PlanBuilder, StackPath};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

/// Result of one planning run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanReport {
    pub environments: Plan,
    /// Every valid stack, sorted
    pub all_stacks: Vec<StackPath>,
    pub has_changes: bool,
}

pub struct PlanningService<F: FileSystem> {
    fs: F,
}

impl<F: FileSystem> PlanningService<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Candidate stack directories before validation
    pub fn candidates(&self, config: &PlannerConfig) -> Vec<StackPath> {
        if config.uses_glob_filter() {
            debug!(filters = ?config.glob_filter, "Expanding glob filters");
            from_glob_filters(&self.fs, &config.root, &config.glob_filter)
        } else {
            from_changed_files(&config.changed_files)
        }
    }

    pub fn run(&self, config: &PlannerConfig) -> Result<PlanReport, ConfigError> {
        let start = Instant::now();
        let patterns = config.pattern_set()?;

        info!(
            changed_files = config.changed_files.len(),
            glob_filters = config.glob_filter.len(),
            environments = %config.environments.names().collect::<Vec<_>>().join(", "),
            patterns = patterns.len(),
            validator = %config.stack_validator,
            "Planning stacks"
        );

        let candidates = self.candidates(config);
        info!(count = candidates.len(), "Candidate directories");

        let mut valid: Vec<StackPath> = candidates
            .into_iter()
            .filter(|stack| {
                let accepted = config
                    .stack_validator
                    .is_valid_stack(&self.fs, &config.root.join(stack.as_str()));
                if !accepted {
                    debug!(stack = %stack, "Rejected candidate");
                }
                accepted
            })
            .collect();
        valid.sort();

        info!(count = valid.len(), "Valid stacks");
        if !valid.is_empty() {
            info!(
                "Stacks: {}",
                valid.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ")
            );
        }

        let plan = PlanBuilder::new(patterns, config.environments.clone())
            .with_mode(config.output_mode)
            .build(&valid);

        debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Planning completed");

        Ok(PlanReport {
            environments: plan,
            has_changes: !valid.is_empty(),
            all_stacks: valid,
        })
    }
}
