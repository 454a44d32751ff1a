//! Items that have already played their entrance animation.

use std::collections::BTreeSet;

/// A set of item indices that only ever grows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitedSet {
    indices: BTreeSet<usize>,
}

impl VisitedSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `index`. Returns `true` if it was not visited before.
    #[inline]
    pub fn mark(&mut self, index: usize) -> bool {
        self.indices.insert(index)
    }

    /// Whether `index` was visited.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Number of visited indices.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether nothing was visited yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Visited indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_once() {
        let mut visited = VisitedSet::new();
        assert!(visited.is_empty());
        assert!(visited.mark(4));
        assert!(!visited.mark(4));
        assert!(visited.contains(4));
        assert!(!visited.contains(5));
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn test_iter_sorted() {
        let mut visited = VisitedSet::new();
        for index in [7, 2, 5, 2] {
            visited.mark(index);
        }
        assert_eq!(visited.iter().collect::<Vec<_>>(), vec![2, 5, 7]);
    }
}
