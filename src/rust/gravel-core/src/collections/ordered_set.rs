use hashbrown::HashTable;
use rustc_hash::FxBuildHasher;
use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};
use std::ops::Index;

/// A committed entry in the index table. Identity is the position in the
/// backing vector, so reallocation of the vector never invalidates a slot.
/// The value's hash is cached here so collision checks and table growth
/// never re-hash the stored value.
#[derive(Clone, Copy)]
struct Slot {
    hash: u64,
    index: usize,
}

/// An append-only sequence with set semantics.
///
/// Values are stored exactly once, in the order of their first successful
/// insertion. Membership and position lookup are O(1) average via a side
/// table that holds only (hash, index) slots, never a second copy of the
/// value. Used throughout the build graph for config lists, library lists
/// and directory sets, which are appended to but never randomly inserted
/// into.
#[derive(Clone)]
pub struct OrderedSet<T> {
    items: Vec<T>,
    index: HashTable<Slot>,
    hasher: FxBuildHasher,
}

impl<T> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedSet<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: HashTable::new(),
            hasher: FxBuildHasher,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            index: HashTable::with_capacity(capacity),
            hasher: FxBuildHasher,
        }
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Capacity hint only; has no effect on contents or order.
    pub fn reserve(&mut self, additional: usize) {
        self.items.reserve(additional);
        self.index.reserve(additional, |slot| slot.hash);
    }

    /// Empties the sequence and the index together. The result is
    /// indistinguishable from a freshly constructed set.
    pub fn clear(&mut self) {
        self.items.clear();
        self.index.clear();
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Hash + Eq> OrderedSet<T> {
    /// Inserts `value` if no equal value is present.
    ///
    /// Returns `true` if the value was appended, `false` if an equal value
    /// already existed (the set is left unmodified). The hash is computed
    /// once, before the value is moved into storage, and reused for the
    /// index slot.
    pub fn insert(&mut self, value: T) -> bool {
        let hash = self.hasher.hash_one(&value);
        let items = &self.items;
        if self
            .index
            .find(hash, |slot| slot.hash == hash && items[slot.index] == value)
            .is_some()
        {
            return false;
        }

        let index = self.items.len();
        self.items.push(value);
        self.index
            .insert_unique(hash, Slot { hash, index }, |slot| slot.hash);
        true
    }

    /// Returns the position at which an equal value was first inserted, or
    /// `None` if no such value is present.
    pub fn index_of<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hasher.hash_one(value);
        let items = &self.items;
        self.index
            .find(hash, |slot| {
                slot.hash == hash && items[slot.index].borrow() == value
            })
            .map(|slot| slot.index)
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index_of(value).is_some()
    }
}

impl<T: Hash + Eq> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Hash + Eq> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T> Index<usize> for OrderedSet<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for OrderedSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for OrderedSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_insert_deduplicates() {
        let mut set = OrderedSet::new();

        assert!(set.insert("x".to_string()));
        assert!(set.insert("y".to_string()));
        assert!(!set.insert("x".to_string()));
        assert!(set.insert("z".to_string()));

        assert_eq!(set.len(), 3);
        assert_eq!(set.as_slice(), ["x", "y", "z"]);
        assert_eq!(set.index_of("y"), Some(1));
        assert_eq!(set.index_of("q"), None);
    }

    #[test]
    fn test_double_insert_grows_by_one() {
        let mut set = OrderedSet::new();

        assert!(set.insert(42u32));
        let len_after_first = set.len();
        assert!(!set.insert(42u32));

        assert_eq!(len_after_first, 1);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_index_of_is_first_insertion_position() {
        let mut set = OrderedSet::new();
        for value in ["a", "b", "c", "b", "a", "d"] {
            set.insert(value.to_string());
        }

        assert_eq!(set.index_of("a"), Some(0));
        assert_eq!(set.index_of("b"), Some(1));
        assert_eq!(set.index_of("c"), Some(2));
        assert_eq!(set.index_of("d"), Some(3));
        assert_eq!(set.index_of("missing"), None);
    }

    #[test]
    fn test_iteration_order_survives_duplicate_attempts() {
        let mut set = OrderedSet::new();
        for value in [3u32, 1, 3, 2, 1, 3] {
            set.insert(value);
        }

        let order: Vec<u32> = set.iter().copied().collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn test_extend_skips_duplicates() {
        let mut set = OrderedSet::new();
        set.insert("a".to_string());
        set.extend(["b".to_string(), "a".to_string(), "b".to_string()]);

        assert_eq!(set.as_slice(), ["a", "b"]);
    }

    #[test]
    fn test_from_iterator() {
        let set: OrderedSet<u32> = [5, 5, 1, 5, 2].into_iter().collect();
        assert_eq!(set.as_slice(), [5, 1, 2]);
    }

    #[test]
    fn test_clear_resets_to_fresh_state() {
        let mut set = OrderedSet::new();
        set.insert("a".to_string());
        set.insert("b".to_string());
        set.clear();

        assert!(set.is_empty());
        assert_eq!(set.index_of("a"), None);

        // Reuse after clear behaves like a fresh instance, including the
        // index rebuilding from scratch.
        assert!(set.insert("b".to_string()));
        assert!(set.insert("a".to_string()));
        assert_eq!(set.index_of("b"), Some(0));
        assert_eq!(set.index_of("a"), Some(1));
    }

    #[test]
    fn test_indexing_and_get() {
        let set: OrderedSet<&str> = ["x", "y"].into_iter().collect();
        assert_eq!(set[0], "x");
        assert_eq!(set.get(1), Some(&"y"));
        assert_eq!(set.get(2), None);
    }

    #[test]
    fn test_reserve_does_not_change_contents() {
        let mut set = OrderedSet::with_capacity(2);
        set.insert(1u64);
        set.insert(2u64);
        set.reserve(1000);

        assert_eq!(set.as_slice(), [1, 2]);
        assert_eq!(set.index_of(&2), Some(1));
    }

    #[test]
    fn test_index_stability_across_growth() {
        // Enough insertions to force several vector reallocations; committed
        // slots must keep resolving to the right positions throughout.
        let mut set = OrderedSet::new();
        for i in 0..1000u32 {
            assert!(set.insert(format!("value_{i}")));
        }
        for i in 0..1000u32 {
            assert_eq!(set.index_of(format!("value_{i}").as_str()), Some(i as usize));
        }
        assert_eq!(set.len(), 1000);
    }

    #[test]
    fn test_clone_preserves_order_and_lookup() {
        let set: OrderedSet<String> = ["c", "a", "b"].iter().map(|s| s.to_string()).collect();
        let copy = set.clone();

        assert_eq!(copy.as_slice(), set.as_slice());
        assert_eq!(copy.index_of("a"), Some(1));
    }

    proptest! {
        #[test]
        fn prop_len_equals_distinct_count(values in proptest::collection::vec("[a-d]{0,3}", 0..64)) {
            let mut set = OrderedSet::new();
            for v in &values {
                set.insert(v.clone());
            }

            let mut seen = Vec::new();
            for v in &values {
                if !seen.contains(v) {
                    seen.push(v.clone());
                }
            }

            // Size equals the number of pairwise-distinct values, and
            // iteration order equals first-occurrence order.
            prop_assert_eq!(set.len(), seen.len());
            prop_assert_eq!(set.as_slice(), seen.as_slice());
            for (i, v) in seen.iter().enumerate() {
                prop_assert_eq!(set.index_of(v.as_str()), Some(i));
            }
        }

        #[test]
        fn prop_insert_reports_novelty(values in proptest::collection::vec(0u8..16, 0..64)) {
            let mut set = OrderedSet::new();
            let mut seen = std::collections::HashSet::new();
            for v in values {
                prop_assert_eq!(set.insert(v), seen.insert(v));
            }
        }
    }
}
