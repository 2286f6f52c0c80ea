//! Environment definitions and prefix-based partitioning

use super::stack::StackPath;
use serde::{Deserialize, Serialize};

/// A named environment and the path prefix its stacks live under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub name: String,
    pub prefix: String,
}

impl Environment {
    pub fn new(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        let prefix: String = prefix.into();
        Self {
            name: name.into(),
            prefix: prefix.trim_end_matches('/').to_string(),
        }
    }

    /// True when `stack` is the prefix itself or lies under `prefix/`
    pub fn contains(&self, stack: &StackPath) -> bool {
        let path = stack.as_str();
        path == self.prefix
            || path
                .strip_prefix(self.prefix.as_str())
                .map(|rest| rest.starts_with('/'))
                .unwrap_or(false)
    }
}

/// Environments in declaration order, names unique
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environments(Vec<Environment>);

impl Environments {
    /// Builds from `(name, prefix)` pairs. A repeated name keeps its first
    /// position and takes the last prefix.
    pub fn from_pairs<I, N, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: Into<String>,
    {
        let mut envs: Vec<Environment> = Vec::new();
        for (name, prefix) in pairs {
            let env = Environment::new(name, prefix);
            match envs.iter_mut().find(|e| e.name == env.name) {
                Some(existing) => existing.prefix = env.prefix,
                None => envs.push(env),
            }
        }
        Self(envs)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Environment> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Environment> {
        self.0.iter().find(|e| e.name == name)
    }
}

impl Default for Environments {
    fn default() -> Self {
        Self::from_pairs([("dev", "dev"), ("prod", "prod")])
    }
}

impl<'a> IntoIterator for &'a Environments {
    type Item = &'a Environment;
    type IntoIter = std::slice::Iter<'a, Environment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Stacks grouped per environment, one entry for every declared environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    entries: Vec<(String, Vec<StackPath>)>,
}

impl Partition {
    pub fn get(&self, name: &str) -> Option<&[StackPath]> {
        self.entries
            .iter()
            .find(|(env, _)| env == name)
            .map(|(_, stacks)| stacks.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[StackPath])> {
        self.entries
            .iter()
            .map(|(name, stacks)| (name.as_str(), stacks.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Splits stacks by environment prefix.
///
/// Environments with no stacks still get an (empty) entry. Membership is not
/// exclusive: with nested prefixes such as `dev` and `dev/sub`, a stack under
/// `dev/sub/` is listed in both.
pub fn partition(stacks: &[StackPath], environments: &Environments) -> Partition {
    let entries = environments
        .iter()
        .map(|env| {
            let members = stacks
                .iter()
                .filter(|stack| env.contains(stack))
                .cloned()
                .collect();
            (env.name.clone(), members)
        })
        .collect();

    Partition { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(raw: &[&str]) -> Vec<StackPath> {
        raw.iter().map(|p| StackPath::new(p).unwrap()).collect()
    }

    #[test]
    fn test_contains_requires_separator() {
        let dev = Environment::new("dev", "stacks/dev");
        assert!(dev.contains(&StackPath::new("stacks/dev/iam").unwrap()));
        assert!(dev.contains(&StackPath::new("stacks/dev").unwrap()));
        assert!(!dev.contains(&StackPath::new("stacks/dev-test/iam").unwrap()));
        assert!(!dev.contains(&StackPath::new("stacks/devx").unwrap()));
    }

    #[test]
    fn test_prefix_trailing_slash_ignored() {
        let dev = Environment::new("dev", "stacks/dev/");
        assert_eq!(dev.prefix, "stacks/dev");
        assert!(dev.contains(&StackPath::new("stacks/dev/iam").unwrap()));
    }

    #[test]
    fn test_partition_by_prefix() {
        let envs = Environments::from_pairs([("dev", "stacks/dev"), ("prod", "stacks/prod")]);
        let stacks = paths(&["stacks/dev/iam", "stacks/prod/dns", "stacks/dev/app", "other/x"]);

        let partition = partition(&stacks, &envs);

        assert_eq!(partition.get("dev").unwrap(), paths(&["stacks/dev/iam", "stacks/dev/app"]));
        assert_eq!(partition.get("prod").unwrap(), paths(&["stacks/prod/dns"]));
    }

    #[test]
    fn test_empty_environments_still_present() {
        let envs = Environments::from_pairs([("dev", "dev"), ("staging", "staging"), ("prod", "prod")]);
        let partition = partition(&paths(&["dev/iam"]), &envs);

        let names: Vec<&str> = partition.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["dev", "staging", "prod"]);
        assert_eq!(partition.get("staging").unwrap().len(), 0);
        assert_eq!(partition.get("prod").unwrap().len(), 0);
    }

    #[test]
    fn test_nested_prefixes_double_count() {
        let envs = Environments::from_pairs([("dev", "dev"), ("sub", "dev/sub")]);
        let partition = partition(&paths(&["dev/sub/x"]), &envs);

        assert_eq!(partition.get("dev").unwrap(), paths(&["dev/sub/x"]));
        assert_eq!(partition.get("sub").unwrap(), paths(&["dev/sub/x"]));
    }

    #[test]
    fn test_duplicate_names_keep_first_position() {
        let envs = Environments::from_pairs([("dev", "a"), ("prod", "p"), ("dev", "b")]);
        let names: Vec<&str> = envs.names().collect();
        assert_eq!(names, vec!["dev", "prod"]);
        assert_eq!(envs.get("dev").unwrap().prefix, "b");
    }

    #[test]
    fn test_default_environments() {
        let envs = Environments::default();
        let names: Vec<&str> = envs.names().collect();
        assert_eq!(names, vec!["dev", "prod"]);
        assert_eq!(envs.get("prod").unwrap().prefix, "prod");
    }
}
