use super::patterns::PatternSet;
use super::stack::StackPath;
use serde::{Deserialize, Serialize};

/// Stacks split into an ordered sequential group and a concurrent group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub sequential: Vec<StackPath>,
    pub parallel: Vec<StackPath>,
}

impl ClassificationResult {
    pub fn is_empty(&self) -> bool {
        self.sequential.is_empty() && self.parallel.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sequential.len() + self.parallel.len()
    }

    /// Sequential stacks followed by parallel ones
    pub fn stacks(&self) -> impl Iterator<Item = &StackPath> {
        self.sequential.iter().chain(self.parallel.iter())
    }
}

/// Places each stack in the bucket of the first pattern it matches.
///
/// Buckets are concatenated in pattern order to form the sequential group;
/// within a bucket and in the parallel group, input order is kept.
pub fn classify<'a, I>(stacks: I, patterns: &PatternSet) -> ClassificationResult
where
    I: IntoIterator<Item = &'a StackPath>,
{
    let mut buckets: Vec<Vec<StackPath>> = vec![Vec::new(); patterns.len()];
    let mut parallel = Vec::new();

    for stack in stacks {
        match patterns.first_match(stack.as_str()) {
            Some(index) => buckets[index].push(stack.clone()),
            None => parallel.push(stack.clone()),
        }
    }

    ClassificationResult {
        sequential: buckets.into_iter().flatten().collect(),
        parallel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn paths(raw: &[&str]) -> Vec<StackPath> {
        raw.iter().map(|p| StackPath::new(p).unwrap()).collect()
    }

    #[test]
    fn test_sequential_follows_pattern_order() {
        let patterns = PatternSet::new(["**/networking", "**/iam"]).unwrap();
        let stacks = paths(&["dev/iam", "dev/app", "dev/networking"]);

        let result = classify(&stacks, &patterns);

        assert_eq!(result.sequential, paths(&["dev/networking", "dev/iam"]));
        assert_eq!(result.parallel, paths(&["dev/app"]));
    }

    #[test]
    fn test_first_match_beats_later_match() {
        let patterns = PatternSet::new(["**/*-data", "**/networking-data"]).unwrap();
        let stacks = paths(&["dev/networking-data"]);

        let result = classify(&stacks, &patterns);
        assert_eq!(result.sequential, stacks);

        // Same stack against reordered patterns lands in the other bucket,
        // and still sorts by bucket rather than by path
        let patterns = PatternSet::new(["**/networking-data", "**/dns", "**/*-data"]).unwrap();
        let stacks = paths(&["dev/zone-data", "dev/dns", "dev/networking-data"]);
        let result = classify(&stacks, &patterns);
        assert_eq!(
            result.sequential,
            paths(&["dev/networking-data", "dev/dns", "dev/zone-data"])
        );
    }

    #[test]
    fn test_input_order_kept_within_bucket() {
        let patterns = PatternSet::new(["**/*-data"]).unwrap();

        let result = classify(&paths(&["b/x-data", "a/y-data"]), &patterns);
        assert_eq!(result.sequential, paths(&["b/x-data", "a/y-data"]));

        let result = classify(&paths(&["a/y-data", "b/x-data"]), &patterns);
        assert_eq!(result.sequential, paths(&["a/y-data", "b/x-data"]));
    }

    #[test]
    fn test_partition_is_complete_and_disjoint() {
        let patterns = PatternSet::default();
        let stacks = paths(&[
            "stacks/dev/app-hello",
            "stacks/dev/dns",
            "stacks/dev/iam",
            "stacks/dev/networking",
            "stacks/dev/orders-data",
            "stacks/dev/remote-state",
            "stacks/dev/worker",
        ]);

        let result = classify(&stacks, &patterns);

        let sequential: HashSet<_> = result.sequential.iter().collect();
        let parallel: HashSet<_> = result.parallel.iter().collect();
        assert!(sequential.is_disjoint(&parallel));
        assert_eq!(result.len(), stacks.len());
        let all: HashSet<_> = result.stacks().collect();
        assert_eq!(all, stacks.iter().collect());
    }

    #[test]
    fn test_reclassification_is_stable() {
        let patterns = PatternSet::default();
        let stacks = paths(&[
            "stacks/prod/app-hello",
            "stacks/prod/iam",
            "stacks/prod/dns",
            "stacks/prod/remote-state",
        ]);

        let first = classify(&stacks, &patterns);
        let fed_back: Vec<StackPath> = first.stacks().cloned().collect();
        let second = classify(&fed_back, &patterns);

        assert_eq!(first, second);
    }

    #[test]
    fn test_no_patterns_everything_parallel() {
        let patterns = PatternSet::new(Vec::<&str>::new()).unwrap();
        let stacks = paths(&["dev/networking", "dev/iam"]);

        let result = classify(&stacks, &patterns);
        assert!(result.sequential.is_empty());
        assert_eq!(result.parallel, stacks);
    }

    #[test]
    fn test_empty_input() {
        let result = classify(&Vec::new(), &PatternSet::default());
        assert!(result.is_empty());
    }
}
