use serde::{Deserialize, Serialize};
use std::fmt;

/// Slash-separated relative path naming one deployable stack.
///
/// Never empty and never `.`; construction strips a leading `./` and any
/// trailing `/`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StackPath(String);

impl StackPath {
    pub fn new(raw: &str) -> Option<Self> {
        let mut path = raw.trim().replace('\\', "/");
        while let Some(rest) = path.strip_prefix("./") {
            path = rest.to_string();
        }
        let path = path.trim_end_matches('/');

        if path.is_empty() || path == "." {
            return None;
        }
        Some(Self(path.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Parent path, or `None` at the top level
    pub fn parent(&self) -> Option<StackPath> {
        self.0.rsplit_once('/').and_then(|(parent, _)| Self::new(parent))
    }
}

impl fmt::Display for StackPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StackPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StackPath {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or_else(|| format!("invalid stack path: {:?}", value))
    }
}

impl From<StackPath> for String {
    fn from(path: StackPath) -> Self {
        path.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_and_dot() {
        assert!(StackPath::new("").is_none());
        assert!(StackPath::new(".").is_none());
        assert!(StackPath::new("./").is_none());
        assert!(StackPath::new("/").is_none());
    }

    #[test]
    fn test_normalizes() {
        assert_eq!(StackPath::new("./stacks/dev/").unwrap().as_str(), "stacks/dev");
        assert_eq!(StackPath::new("stacks\\dev\\iam").unwrap().as_str(), "stacks/dev/iam");
    }

    #[test]
    fn test_name_and_parent() {
        let path = StackPath::new("stacks/dev/app/.boilerplate").unwrap();
        assert_eq!(path.name(), ".boilerplate");
        assert_eq!(path.parent().unwrap().as_str(), "stacks/dev/app");
        assert!(StackPath::new("stacks").unwrap().parent().is_none());
    }

    #[test]
    fn test_serde_is_transparent() {
        let path = StackPath::new("dev/iam").unwrap();
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"dev/iam\"");
        let parsed: StackPath = serde_json::from_str("\"dev/iam/\"").unwrap();
        assert_eq!(parsed, path);
        assert!(serde_json::from_str::<StackPath>("\".\"").is_err());
    }
}
