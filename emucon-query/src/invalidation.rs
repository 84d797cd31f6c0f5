//! Invalidation sets: the key families a write makes stale.

use crate::key::QueryKey;

/// Key-family prefixes to mark stale after a successful mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvalidationSet(Vec<QueryKey>);

impl InvalidationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a family prefix. Duplicates are ignored.
    pub fn with(mut self, family: QueryKey) -> Self {
        self.push(family);
        self
    }

    pub fn push(&mut self, family: QueryKey) {
        if !self.0.contains(&family) {
            self.0.push(family);
        }
    }

    pub fn matches(&self, key: &QueryKey) -> bool {
        self.0.iter().any(|family| key.starts_with(family))
    }

    pub fn families(&self) -> &[QueryKey] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<QueryKey> for InvalidationSet {
    fn from_iter<I: IntoIterator<Item = QueryKey>>(iter: I) -> Self {
        let mut set = Self::new();
        for family in iter {
            set.push(family);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_any_family() {
        let set = InvalidationSet::new()
            .with(QueryKey::new("buckets"))
            .with(QueryKey::new("objects").segment("photos"));

        assert!(set.matches(&QueryKey::new("buckets")));
        assert!(set.matches(&QueryKey::new("objects").segment("photos").segment("{}")));
        assert!(!set.matches(&QueryKey::new("objects").segment("docs")));
    }

    #[test]
    fn test_duplicates_collapse() {
        let set: InvalidationSet = vec![QueryKey::new("users"), QueryKey::new("users")]
            .into_iter()
            .collect();
        assert_eq!(set.families().len(), 1);
    }
}
