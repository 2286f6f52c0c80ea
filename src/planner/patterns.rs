use super::glob::{GlobError, GlobMatcher};

/// Built-in priority order, most foundational first
pub const DEFAULT_PATTERNS: &[&str] = &[
    "**/remote-state",
    "**/networking-data",
    "**/networking",
    "**/dns",
    "**/certificates",
    "**/load-balancing-*-data",
    "**/load-balancing-*",
    "**/iam",
    "**/app-common",
    "**/datadog-common",
    "**/databases",
    "**/rds-bastion",
    "**/*-data",
];

/// Ordered priority patterns; position is priority.
#[derive(Debug, Clone)]
pub struct PatternSet {
    matchers: Vec<GlobMatcher>,
}

impl PatternSet {
    pub fn new<I, S>(patterns: I) -> Result<Self, GlobError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let matchers = patterns
            .into_iter()
            .map(|p| GlobMatcher::compile(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { matchers })
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.matchers.iter().map(|m| m.pattern())
    }

    /// Index of the first pattern matching `path`
    pub fn first_match(&self, path: &str) -> Option<usize> {
        self.matchers.iter().position(|m| m.test(path))
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERNS).expect("built-in patterns compile")
    }
}
