use std::collections::{HashSet, hash_set};
use std::fmt;

/// Unordered pair. Both elements are kept in canonical order so that
/// `Pair::new(a, b) == Pair::new(b, a)` and both hash identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pair<T> {
    low: T,
    high: T,
}

impl<T: Ord> Pair<T> {
    pub fn new(a: T, b: T) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn low(&self) -> &T {
        &self.low
    }

    pub fn high(&self) -> &T {
        &self.high
    }

    pub fn contains(&self, item: &T) -> bool {
        &self.low == item || &self.high == item
    }
}

impl<T: fmt::Display> fmt::Display for Pair<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.low, self.high)
    }
}

/// Set of unordered pairs. Used for the independent-action whitelist and for
/// the per-layer mutex sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairSet<T: Ord + std::hash::Hash> {
    pairs: HashSet<Pair<T>>,
}

impl<T: Ord + std::hash::Hash> Default for PairSet<T> {
    fn default() -> Self {
        Self { pairs: HashSet::new() }
    }
}

impl<T: Ord + std::hash::Hash> PairSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the pair was already present.
    pub fn add(&mut self, a: T, b: T) -> bool {
        self.pairs.insert(Pair::new(a, b))
    }

    pub fn contains(&self, a: T, b: T) -> bool {
        self.pairs.contains(&Pair::new(a, b))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, Pair<T>> {
        self.pairs.iter()
    }

    pub fn is_subset(&self, other: &PairSet<T>) -> bool {
        self.pairs.is_subset(&other.pairs)
    }
}

impl<T: Ord + std::hash::Hash> std::iter::FromIterator<(T, T)> for PairSet<T> {
    fn from_iter<I: IntoIterator<Item = (T, T)>>(iter: I) -> Self {
        let mut set = PairSet::new();
        for (a, b) in iter {
            set.add(a, b);
        }
        set
    }
}

impl<'a, T: Ord + std::hash::Hash> IntoIterator for &'a PairSet<T> {
    type Item = &'a Pair<T>;
    type IntoIter = hash_set::Iter<'a, Pair<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use super::{Pair, PairSet};

    fn hash_of<T: Hash>(item: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        item.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_pair_is_symmetric() {
        assert_eq!(Pair::new(3, 7), Pair::new(7, 3));
        assert_eq!(hash_of(&Pair::new("p", "q")), hash_of(&Pair::new("q", "p")));
        assert_eq!(*Pair::new(7, 3).low(), 3);
        assert!(Pair::new(7, 3).contains(&7));
        assert!(!Pair::new(7, 3).contains(&5));
    }

    #[test]
    fn test_set_membership() {
        let mut set = PairSet::new();
        assert!(set.add(1, 2));
        assert!(!set.add(2, 1));
        assert!(set.contains(2, 1));
        assert!(set.contains(1, 2));
        assert!(!set.contains(1, 3));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_reflexive_pair() {
        let set: PairSet<u32> = vec![(4, 4)].into_iter().collect();
        assert!(set.contains(4, 4));
        assert!(!set.contains(4, 5));
    }

    #[test]
    fn test_subset() {
        let small: PairSet<u32> = vec![(1, 2)].into_iter().collect();
        let big: PairSet<u32> = vec![(2, 1), (3, 1)].into_iter().collect();
        assert!(small.is_subset(&big));
        assert!(!big.is_subset(&small));
    }
}
