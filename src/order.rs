//! The order index kept by ordered maps and sets.
//!
//! An [`OrderIndex`] is a list of keys whose positions define iteration
//! order. Ordered collections update it in the same call that updates their
//! hash table, so the index always holds exactly the table's keys. How a key
//! is taken out of the middle of the list is decided by an
//! [`OrderStrategy`].

use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt::Debug;
use core::marker::PhantomData;

/// How an order index closes the gap left by a removed key.
pub trait OrderStrategy: Debug + Default + Clone + Copy {
    /// Removes and returns the key at `index`.
    ///
    /// `index` is always in bounds.
    fn remove<K>(keys: &mut Vec<K>, index: usize) -> K;
}

/// Insertion order, preserved across removals.
///
/// Removing from the middle shifts every later key down by one, which costs
/// `O(n)`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListOrder;

impl OrderStrategy for ListOrder {
    #[inline]
    fn remove<K>(keys: &mut Vec<K>, index: usize) -> K {
        keys.remove(index)
    }
}

/// Indexable order with `O(1)` removal.
///
/// The last key moves into the removed position, so the relative order of
/// the remaining keys is not preserved.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BagOrder;

impl OrderStrategy for BagOrder {
    #[inline]
    fn remove<K>(keys: &mut Vec<K>, index: usize) -> K {
        keys.swap_remove(index)
    }
}

/// The ordered list of keys that backs an ordered collection.
#[derive(Clone)]
pub(crate) struct OrderIndex<K, O> {
    keys: Vec<K>,
    _strategy: PhantomData<O>,
}

impl<K, O: OrderStrategy> OrderIndex<K, O> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
            _strategy: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[K] {
        &self.keys
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [K] {
        &mut self.keys
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<&K> {
        self.keys.get(index)
    }

    pub(crate) fn push(&mut self, key: K) {
        self.keys.push(key);
    }

    /// Inserts `key` at `index`, shifting later keys up. `index <= len`.
    pub(crate) fn insert(&mut self, index: usize, key: K) {
        self.keys.insert(index, key);
    }

    /// Removes the key at `index` using the strategy. `index < len`.
    pub(crate) fn remove(&mut self, index: usize) -> K {
        O::remove(&mut self.keys, index)
    }

    pub(crate) fn pop(&mut self) -> Option<K> {
        self.keys.pop()
    }

    /// Replaces the key at `index`, returning the old one. `index < len`.
    pub(crate) fn replace(&mut self, index: usize, key: K) -> K {
        core::mem::replace(&mut self.keys[index], key)
    }

    /// Moves the key at `from` so that it ends up at `to`, shifting the keys
    /// in between by one. Both indices are `< len`.
    pub(crate) fn move_index(&mut self, from: usize, to: usize) {
        if from < to {
            self.keys[from..=to].rotate_left(1);
        } else if to < from {
            self.keys[to..=from].rotate_right(1);
        }
    }

    /// Position of `key`, found by a linear scan.
    pub(crate) fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.keys.iter().position(|k| <K as Borrow<Q>>::borrow(k) == key)
    }

    /// Removes and returns every key from `len` on.
    pub(crate) fn split_off(&mut self, len: usize) -> Vec<K> {
        self.keys.split_off(len)
    }

    pub(crate) fn clear(&mut self) {
        self.keys.clear();
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.keys.reserve(additional);
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.keys.shrink_to_fit();
    }

    pub(crate) fn into_vec(self) -> Vec<K> {
        self.keys
    }

    pub(crate) fn iter(&self) -> core::slice::Iter<'_, K> {
        self.keys.iter()
    }

    /// Shuffles the keys in place.
    #[cfg(feature = "rand")]
    pub(crate) fn shuffle<R>(&mut self, rng: &mut R)
    where
        R: rand::Rng + ?Sized,
    {
        use rand::seq::SliceRandom;

        self.keys.shuffle(rng);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn list(keys: &[u32]) -> OrderIndex<u32, ListOrder> {
        let mut index = OrderIndex::with_capacity(keys.len());
        for &k in keys {
            index.push(k);
        }
        index
    }

    fn bag(keys: &[u32]) -> OrderIndex<u32, BagOrder> {
        let mut index = OrderIndex::with_capacity(keys.len());
        for &k in keys {
            index.push(k);
        }
        index
    }

    #[test]
    fn list_removal_shifts() {
        let mut index = list(&[1, 2, 3, 4]);
        assert_eq!(index.remove(1), 2);
        assert_eq!(index.as_slice(), [1, 3, 4]);
    }

    #[test]
    fn bag_removal_swaps_last() {
        let mut index = bag(&[1, 2, 3, 4]);
        assert_eq!(index.remove(0), 1);
        assert_eq!(index.as_slice(), [4, 2, 3]);
        assert_eq!(index.remove(2), 3);
        assert_eq!(index.as_slice(), [4, 2]);
    }

    #[test]
    fn move_index_both_directions() {
        let mut index = list(&[0, 1, 2, 3, 4]);
        index.move_index(1, 3);
        assert_eq!(index.as_slice(), [0, 2, 3, 1, 4]);
        index.move_index(3, 0);
        assert_eq!(index.as_slice(), [1, 0, 2, 3, 4]);
        index.move_index(2, 2);
        assert_eq!(index.as_slice(), [1, 0, 2, 3, 4]);
    }

    #[test]
    fn position_and_replace() {
        let mut index = list(&[5, 6, 7]);
        assert_eq!(index.position(&7), Some(2));
        assert_eq!(index.position(&8), None);
        assert_eq!(index.replace(2, 8), 7);
        assert_eq!(index.position(&8), Some(2));
    }

    #[test]
    fn split_off_returns_tail() {
        let mut index = list(&[1, 2, 3, 4]);
        assert_eq!(index.split_off(1), vec![2, 3, 4]);
        assert_eq!(index.as_slice(), [1]);
    }

    #[cfg(feature = "rand")]
    #[test]
    fn shuffle_is_a_permutation() {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        let mut index = list(&(0..100).collect::<Vec<_>>());
        index.shuffle(&mut SmallRng::seed_from_u64(7));
        let mut keys = index.as_slice().to_vec();
        keys.sort();
        assert_eq!(keys, (0..100).collect::<Vec<_>>());
    }
}
