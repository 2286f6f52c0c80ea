//! Output formatting for multiple formats
//!
//! The `github` format writes `key=value` lines with JSON-encoded values, the
//! shape CI step outputs expect. JSON and YAML serialize the whole report;
//! `human` renders a short tree for terminals.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::planner::{ClassificationResult, EnvironmentPlan, Stage, StackPath};
use crate::service::PlanReport;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `key=value` lines for CI step outputs
    Github,
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

/// Output formatter for planning results
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a full planning report
    pub fn format_report(&self, report: &PlanReport) -> Result<String> {
        match self.format {
            OutputFormat::Github => self.format_report_github(report),
            OutputFormat::Json => to_json(report),
            OutputFormat::Yaml => to_yaml(report),
            OutputFormat::Human => Ok(self.format_report_human(report)),
        }
    }

    /// Formats a bare classification
    pub fn format_classification(&self, result: &ClassificationResult) -> Result<String> {
        match self.format {
            OutputFormat::Github => {
                let mut output = String::new();
                push_line(&mut output, "sequential", &result.sequential)?;
                push_line(&mut output, "parallel", &result.parallel)?;
                Ok(output)
            }
            OutputFormat::Json => to_json(result),
            OutputFormat::Yaml => to_yaml(result),
            OutputFormat::Human => {
                let mut output = String::new();
                push_group_human(&mut output, "Sequential", &result.sequential, false);
                push_group_human(&mut output, "Parallel", &result.parallel, true);
                Ok(output)
            }
        }
    }

    fn format_report_github(&self, report: &PlanReport) -> Result<String> {
        let mut output = String::new();

        for (env, plan) in report.environments.iter() {
            match plan {
                EnvironmentPlan::Stages(stages) => {
                    push_line(&mut output, &format!("{}-stages", env), stages)?;
                }
                EnvironmentPlan::Groups(groups) => {
                    push_line(&mut output, &format!("{}-sequential", env), &groups.sequential)?;
                    push_line(&mut output, &format!("{}-parallel", env), &groups.parallel)?;
                }
            }
        }

        push_line(&mut output, "all-stacks", &report.all_stacks)?;
        push_line(&mut output, "has-changes", &report.has_changes)?;
        Ok(output)
    }

    fn format_report_human(&self, report: &PlanReport) -> String {
        let mut output = String::new();

        if report.has_changes {
            output.push_str(&format!(
                "\u{2713} Deployment Plan ({} stacks)\n",
                report.all_stacks.len()
            ));
        } else {
            output.push_str("\u{26A0} Deployment Plan (no stacks found)\n");
        }
        output.push_str(&"\u{2501}".repeat(42));
        output.push_str("\n\n");

        for (env, plan) in report.environments.iter() {
            output.push_str(&format!("{}:\n", env));
            if plan.is_empty() {
                output.push_str("\u{2514}\u{2500} (nothing to deploy)\n\n");
                continue;
            }
            match plan {
                EnvironmentPlan::Stages(stages) => {
                    for (i, stage) in stages.iter().enumerate() {
                        push_stage_human(&mut output, stage, i + 1 == stages.len());
                    }
                }
                EnvironmentPlan::Groups(groups) => {
                    push_group_human(&mut output, "Sequential", &groups.sequential, false);
                    push_group_human(&mut output, "Parallel", &groups.parallel, true);
                }
            }
            output.push('\n');
        }

        output
    }
}

/// Appends `content` to `path`, creating the file when missing
pub fn append_to_file(path: &Path, content: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open output file {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write output file {}", path.display()))
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize result to JSON")
}

fn to_yaml<T: Serialize>(value: &T) -> Result<String> {
    serde_yaml::to_string(value).context("Failed to serialize result to YAML")
}

fn push_line<T: Serialize + ?Sized>(output: &mut String, key: &str, value: &T) -> Result<()> {
    let encoded = serde_json::to_string(value)
        .with_context(|| format!("Failed to serialize output '{}'", key))?;
    output.push_str(key);
    output.push('=');
    output.push_str(&encoded);
    output.push('\n');
    Ok(())
}

fn push_stage_human(output: &mut String, stage: &Stage, last: bool) {
    let label = if stage.parallel {
        format!("{} (concurrent)", stage.name)
    } else {
        format!("{} (in order)", stage.name)
    };
    push_group_human(output, &label, &stage.stacks, last);
}

fn push_group_human(output: &mut String, label: &str, stacks: &[StackPath], last: bool) {
    let branch = if last { "\u{2514}\u{2500}" } else { "\u{251C}\u{2500}" };
    let rail = if last { "   " } else { "\u{2502}  " };

    output.push_str(&format!("{} {}\n", branch, label));
    if stacks.is_empty() {
        output.push_str(&format!("{}\u{2514}\u{2500} (none)\n", rail));
        return;
    }
    for (i, stack) in stacks.iter().enumerate() {
        let leaf = if i + 1 == stacks.len() {
            "\u{2514}\u{2500}"
        } else {
            "\u{251C}\u{2500}"
        };
        output.push_str(&format!("{}{} {}\n", rail, leaf, stack));
    }
}
