use super::classify::{classify, ClassificationResult};
use super::environment::{partition, Environments};
use super::patterns::PatternSet;
use super::stack::StackPath;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub const SEQUENTIAL_STAGE: &str = "sequential";
pub const PARALLEL_STAGE: &str = "parallel";

/// A named unit of the execution plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    pub stacks: Vec<StackPath>,
    pub parallel: bool,
}

/// Shape of each environment's entry in the plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Named stages: `sequential` then `parallel`, empty ones omitted
    #[default]
    Stages,
    /// Raw `{sequential, parallel}` groups
    Groups,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stages" => Ok(Self::Stages),
            "groups" => Ok(Self::Groups),
            other => Err(format!(
                "Invalid output mode '{}'. Valid options: stages, groups",
                other
            )),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stages => write!(f, "stages"),
            Self::Groups => write!(f, "groups"),
        }
    }
}

/// One environment's slice of the plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EnvironmentPlan {
    Stages(Vec<Stage>),
    Groups(ClassificationResult),
}

impl EnvironmentPlan {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Stages(stages) => stages.is_empty(),
            Self::Groups(groups) => groups.is_empty(),
        }
    }
}

/// Per-environment plan in environment declaration order.
///
/// Serializes as a map from environment name to its entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    entries: Vec<(String, EnvironmentPlan)>,
}

impl Plan {
    pub fn get(&self, environment: &str) -> Option<&EnvironmentPlan> {
        self.entries
            .iter()
            .find(|(name, _)| name == environment)
            .map(|(_, plan)| plan)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EnvironmentPlan)> {
        self.entries.iter().map(|(name, plan)| (name.as_str(), plan))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Plan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, plan) in &self.entries {
            map.serialize_entry(name, plan)?;
        }
        map.end()
    }
}

/// Turns a classification into the stage list for one environment
pub fn stages(result: ClassificationResult) -> Vec<Stage> {
    let mut stages = Vec::with_capacity(2);
    if !result.sequential.is_empty() {
        stages.push(Stage {
            name: SEQUENTIAL_STAGE.to_string(),
            stacks: result.sequential,
            parallel: false,
        });
    }
    if !result.parallel.is_empty() {
        stages.push(Stage {
            name: PARALLEL_STAGE.to_string(),
            stacks: result.parallel,
            parallel: true,
        });
    }
    stages
}

/// Partitions stacks by environment and classifies each environment
/// independently with the same pattern set.
#[derive(Debug, Clone)]
pub struct PlanBuilder {
    patterns: PatternSet,
    environments: Environments,
    mode: OutputMode,
}

impl PlanBuilder {
    pub fn new(patterns: PatternSet, environments: Environments) -> Self {
        Self {
            patterns,
            environments,
            mode: OutputMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn environments(&self) -> &Environments {
        &self.environments
    }

    pub fn build(&self, stacks: &[StackPath]) -> Plan {
        let partitioned = partition(stacks, &self.environments);

        let entries = partitioned
            .iter()
            .map(|(name, env_stacks)| {
                let result = classify(env_stacks, &self.patterns);
                debug!(
                    environment = name,
                    sequential = result.sequential.len(),
                    parallel = result.parallel.len(),
                    "Classified environment"
                );
                let plan = match self.mode {
                    OutputMode::Stages => EnvironmentPlan::Stages(stages(result)),
                    OutputMode::Groups => EnvironmentPlan::Groups(result),
                };
                (name.to_string(), plan)
            })
            .collect();

        Plan { entries }
    }
}
