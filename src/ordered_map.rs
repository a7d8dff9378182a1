//! A hash map that remembers the order of its keys.
//!
//! [`OrderedMap`] pairs a [`HashTable`] with an order index: a list holding
//! every key once, in iteration order. Lookups by key go through the table
//! and stay `O(1)`. Positional operations (`get_at`, `remove_at`,
//! `insert_at`, sorting) go through the index. Every call that adds, removes
//! or renames a key updates both structures before it returns, so the index
//! and the table always hold the same keys.
//!
//! The order strategy `O` decides what happens when a key leaves the middle
//! of the index:
//!
//! - [`ListOrder`] (the default) shifts later keys down and keeps insertion
//!   order. Removal is `O(n)`.
//! - [`BagOrder`] moves the last key into the gap. Removal is `O(1)`, but the
//!   order of the remaining keys changes.
//!
//! Removing by key first finds the key's position with a linear scan of the
//! index, so it is `O(n)` under both strategies; use
//! [`remove_at`](OrderedMap::remove_at) when the position is known.
//!
//! Keys are stored in both the table and the index, so they must be `Clone`.

use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::iter::FusedIterator;

use crate::error::Error;
use crate::hash_map::equivalent_key;
use crate::hash_table::Entry as TableEntry;
use crate::hash_table::HashTable;
use crate::hasher::DefaultHashBuilder;
use crate::order::ListOrder;
use crate::order::OrderIndex;
use crate::order::OrderStrategy;
use crate::sizing::LoadFactor;

#[cfg(doc)]
use crate::order::BagOrder;

/// Finds the entry for a key known to be in `table`.
fn lookup<'a, K, V, S>(table: &'a HashTable<(K, V)>, hash_builder: &S, key: &K) -> &'a (K, V)
where
    K: Hash + Eq,
    S: BuildHasher,
{
    match table.find(hash_builder.hash_one(key), |(k, _)| k == key) {
        Some(entry) => entry,
        None => unreachable!("order index holds a key missing from the table"),
    }
}

fn lookup_mut<'a, K, V, S>(
    table: &'a mut HashTable<(K, V)>,
    hash_builder: &S,
    key: &K,
) -> &'a mut (K, V)
where
    K: Hash + Eq,
    S: BuildHasher,
{
    match table.find_mut(hash_builder.hash_one(key), |(k, _)| k == key) {
        Some(entry) => entry,
        None => unreachable!("order index holds a key missing from the table"),
    }
}

fn take<K, V, S>(table: &mut HashTable<(K, V)>, hash_builder: &S, key: &K) -> (K, V)
where
    K: Hash + Eq,
    S: BuildHasher,
{
    match table.remove(hash_builder.hash_one(key), |(k, _)| k == key) {
        Some(entry) => entry,
        None => unreachable!("order index holds a key missing from the table"),
    }
}

/// A hash map that iterates in the order of its order index.
///
/// By default this is insertion order; see the [module docs](self) for the
/// [`BagOrder`] alternative.
///
/// # Examples
///
/// ```rust
/// use linprobe::OrderedMap;
///
/// let mut map: OrderedMap<&str, i32> = OrderedMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
/// map.insert("c", 3);
///
/// assert_eq!(map.remove_at(1), Ok(("b", 2)));
/// assert_eq!(map.order(), ["a", "c"]);
/// assert_eq!(map.get("b"), None);
/// ```
#[derive(Clone)]
pub struct OrderedMap<K, V, S = DefaultHashBuilder, O = ListOrder> {
    table: HashTable<(K, V)>,
    order: OrderIndex<K, O>,
    hash_builder: S,
}

impl<K, V, S, O> OrderedMap<K, V, S, O>
where
    O: OrderStrategy,
{
    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.order.len() == 0
    }

    /// Returns the number of slots in the underlying table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the number of entries at which the map grows.
    pub fn threshold(&self) -> usize {
        self.table.threshold()
    }

    /// Returns the map's load factor.
    pub fn load_factor(&self) -> f32 {
        self.table.load_factor()
    }

    /// Returns a reference to the map's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// The keys in iteration order.
    ///
    /// `order()[i]` is the key of the `i`-th entry returned by
    /// [`iter`](Self::iter).
    pub fn order(&self) -> &[K] {
        self.order.as_slice()
    }

    /// Returns the key at `index`, or `None` if `index >= len`.
    pub fn key_at(&self, index: usize) -> Option<&K> {
        self.order.get(index)
    }

    /// An iterator over the keys in order.
    pub fn keys(&self) -> Keys<'_, K> {
        Keys {
            inner: self.order.iter(),
        }
    }

    /// Removes every entry. Keeps the allocated capacity.
    pub fn clear(&mut self) {
        self.table.clear();
        self.order.clear();
    }

    /// Reserves room for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
        self.order.reserve(additional);
    }

    /// Shrinks the table and the order index as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.table.shrink_to_fit();
        self.order.shrink_to_fit();
    }

    /// Swaps the positions of the entries at `a` and `b`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if either index is `>= len`.
    pub fn swap_indices(&mut self, a: usize, b: usize) -> Result<(), Error> {
        Error::check_index(a, self.len())?;
        Error::check_index(b, self.len())?;
        self.order.as_mut_slice().swap(a, b);
        Ok(())
    }

    /// Reverses the iteration order.
    pub fn reverse(&mut self) {
        self.order.as_mut_slice().reverse();
    }

    /// Sorts the iteration order by key.
    ///
    /// The sort is stable.
    pub fn sort(&mut self)
    where
        K: Ord,
    {
        self.order.as_mut_slice().sort();
    }

    /// Sorts the iteration order with a key comparator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linprobe::OrderedMap;
    ///
    /// let mut map: OrderedMap<i32, ()> = [(1, ()), (3, ()), (2, ())].into_iter().collect();
    /// map.sort_by(|a, b| b.cmp(a));
    /// assert_eq!(map.order(), [3, 2, 1]);
    /// ```
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&K, &K) -> Ordering,
    {
        self.order.as_mut_slice().sort_by(compare);
    }

    /// Randomly permutes the iteration order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rand::SeedableRng;
    /// use rand::rngs::SmallRng;
    ///
    /// use linprobe::OrderedMap;
    ///
    /// let mut map: OrderedMap<i32, i32> = (0..10).map(|i| (i, i)).collect();
    /// map.shuffle(&mut SmallRng::seed_from_u64(1));
    ///
    /// let mut keys = map.order().to_vec();
    /// keys.sort();
    /// assert_eq!(keys, (0..10).collect::<Vec<_>>());
    /// ```
    #[cfg(feature = "rand")]
    pub fn shuffle<R>(&mut self, rng: &mut R)
    where
        R: rand::Rng + ?Sized,
    {
        self.order.shuffle(rng);
    }

    /// Returns probe statistics for the underlying table.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> crate::hash_table::DebugStats {
        self.table.debug_stats()
    }
}

impl<K, V, S, O> OrderedMap<K, V, S, O>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
    O: OrderStrategy,
{
    /// Creates an empty map with the given hasher builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates an empty map that holds at least `capacity` entries before
    /// growing, using the given hasher builder.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            order: OrderIndex::with_capacity(capacity),
            hash_builder,
        }
    }

    /// Creates an empty map with the given capacity, load factor and hasher
    /// builder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLoadFactor`] if `load_factor` is not in
    /// `[1/1024, 1]`.
    pub fn with_capacity_load_factor_and_hasher(
        capacity: usize,
        load_factor: f32,
        hash_builder: S,
    ) -> Result<Self, Error> {
        Ok(Self {
            table: HashTable::with_sizing(capacity, LoadFactor::new(load_factor)?),
            order: OrderIndex::with_capacity(capacity),
            hash_builder,
        })
    }

    /// Inserts a key-value pair.
    ///
    /// A new key is appended to the order. If the key was present, its value
    /// is replaced, its position is kept, and the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linprobe::OrderedMap;
    ///
    /// let mut map: OrderedMap<&str, i32> = OrderedMap::new();
    /// assert_eq!(map.insert("a", 1), None);
    /// assert_eq!(map.insert("b", 2), None);
    /// assert_eq!(map.insert("a", 3), Some(1));
    /// assert_eq!(map.order(), ["a", "b"]);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hash_builder.hash_one(&key);
        match self.table.entry(hash, |(k, _)| k == &key) {
            TableEntry::Occupied(mut entry) => Some(core::mem::replace(&mut entry.get_mut().1, value)),
            TableEntry::Vacant(entry) => {
                entry.insert((key.clone(), value));
                self.order.push(key);
                None
            }
        }
    }

    /// Inserts a key-value pair at position `index` of the order.
    ///
    /// A new key is inserted at `index`, which may equal `len` to append. An
    /// existing key has its value replaced and is moved to `index`, which
    /// must then be `< len`; the old value is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index` is out of range. The
    /// map is not modified.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linprobe::OrderedMap;
    /// use linprobe::Error;
    ///
    /// let mut map: OrderedMap<char, i32> = OrderedMap::new();
    /// map.insert('a', 1);
    /// map.insert('b', 2);
    ///
    /// assert_eq!(map.insert_at(0, 'z', 26)?, None);
    /// assert_eq!(map.order(), ['z', 'a', 'b']);
    ///
    /// assert_eq!(map.insert_at(2, 'z', 0)?, Some(26));
    /// assert_eq!(map.order(), ['a', 'b', 'z']);
    ///
    /// assert!(map.insert_at(9, 'q', 0).is_err());
    /// # Ok::<(), Error>(())
    /// ```
    pub fn insert_at(&mut self, index: usize, key: K, value: V) -> Result<Option<V>, Error> {
        let len = self.len();
        let hash = self.hash_builder.hash_one(&key);
        match self.table.entry(hash, |(k, _)| k == &key) {
            TableEntry::Occupied(mut entry) => {
                Error::check_index(index, len)?;
                let old = core::mem::replace(&mut entry.get_mut().1, value);
                let Some(from) = self.order.position(&key) else {
                    unreachable!("table holds a key missing from the order index");
                };
                self.order.move_index(from, index);
                Ok(Some(old))
            }
            TableEntry::Vacant(entry) => {
                Error::check_index(index, len + 1)?;
                entry.insert((key.clone(), value));
                self.order.insert(index, key);
                Ok(None)
            }
        }
    }

    /// Returns the value for `key`, inserting the result of `default` first
    /// if the key is absent.
    pub fn get_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> &mut V {
        let hash = self.hash_builder.hash_one(&key);
        match self.table.entry(hash, |(k, _)| k == &key) {
            TableEntry::Occupied(entry) => &mut entry.into_mut().1,
            TableEntry::Vacant(entry) => {
                self.order.push(key.clone());
                &mut entry.insert((key, default())).1
            }
        }
    }

    /// Returns a reference to the value for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns the stored key and value for `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        self.table
            .find(hash, equivalent_key(key))
            .map(|(k, v)| (k, v))
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        self.table
            .find_mut(hash, equivalent_key(key))
            .map(|(_, v)| v)
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns the position of `key` in the order. Scans the order index.
    pub fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if !self.contains_key(key) {
            return None;
        }
        self.order.position(key)
    }

    /// Returns the entry at `index`, or `None` if `index >= len`.
    pub fn get_at(&self, index: usize) -> Option<(&K, &V)> {
        let key = self.order.get(index)?;
        let (_, value) = lookup(&self.table, &self.hash_builder, key);
        Some((key, value))
    }

    /// Returns the entry at `index` with a mutable value, or `None` if
    /// `index >= len`.
    pub fn get_at_mut(&mut self, index: usize) -> Option<(&K, &mut V)> {
        let key = self.order.get(index)?;
        let (_, value) = lookup_mut(&mut self.table, &self.hash_builder, key);
        Some((key, value))
    }

    /// Replaces the value at `index`, returning the old value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= len`.
    pub fn set_at(&mut self, index: usize, value: V) -> Result<V, Error> {
        let len = self.len();
        match self.get_at_mut(index) {
            Some((_, slot)) => Ok(core::mem::replace(slot, value)),
            None => Err(Error::IndexOutOfBounds { index, len }),
        }
    }

    /// Returns the first entry in the order.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.get_at(0)
    }

    /// Returns the last entry in the order.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.get_at(self.len().checked_sub(1)?)
    }

    /// Removes `key`, returning its value.
    ///
    /// The key's position is found by scanning the order index, then removed
    /// according to the order strategy.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes `key`, returning the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        let (k, v) = self.table.remove(hash, equivalent_key(key))?;
        let Some(index) = self.order.position::<K>(&k) else {
            unreachable!("table holds a key missing from the order index");
        };
        self.order.remove(index);
        Some((k, v))
    }

    /// Removes the entry at `index`.
    ///
    /// Under [`ListOrder`] later entries shift down by one. Under
    /// [`BagOrder`] the last entry moves into `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= len`. The map is not
    /// modified.
    pub fn remove_at(&mut self, index: usize) -> Result<(K, V), Error> {
        Error::check_index(index, self.len())?;
        let key = self.order.remove(index);
        Ok(take(&mut self.table, &self.hash_builder, &key))
    }

    /// Removes and returns the last entry in the order.
    pub fn pop(&mut self) -> Option<(K, V)> {
        let key = self.order.pop()?;
        Some(take(&mut self.table, &self.hash_builder, &key))
    }

    /// Replaces the key `before` with `after`, keeping its position and
    /// value.
    ///
    /// Returns `false` and leaves the map unchanged if `before` is absent or
    /// `after` is already present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linprobe::OrderedMap;
    ///
    /// let mut map: OrderedMap<&str, i32> = OrderedMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    ///
    /// assert!(map.alter("a", "z"));
    /// assert_eq!(map.order(), ["z", "b"]);
    /// assert_eq!(map.get("z"), Some(&1));
    ///
    /// assert!(!map.alter("z", "b"));
    /// assert!(!map.alter("missing", "y"));
    /// ```
    pub fn alter<Q>(&mut self, before: &Q, after: K) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.contains_key::<K>(&after) || !self.contains_key(before) {
            return false;
        }
        let Some(index) = self.order.position(before) else {
            unreachable!("table holds a key missing from the order index");
        };
        self.rename_at(index, after);
        true
    }

    /// Replaces the key at `index` with `after`, keeping its position and
    /// value.
    ///
    /// Returns `Ok(false)` and leaves the map unchanged if `after` is already
    /// present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= len`.
    pub fn alter_at(&mut self, index: usize, after: K) -> Result<bool, Error> {
        Error::check_index(index, self.len())?;
        if self.contains_key(&after) {
            return Ok(false);
        }
        self.rename_at(index, after);
        Ok(true)
    }

    /// Renames the key at `index` to `after`, which must be absent.
    fn rename_at(&mut self, index: usize, after: K) {
        let before = self.order.replace(index, after.clone());
        let (_, value) = take(&mut self.table, &self.hash_builder, &before);
        let hash = self.hash_builder.hash_one(&after);
        match self.table.entry(hash, |(k, _)| k == &after) {
            TableEntry::Vacant(entry) => {
                entry.insert((after, value));
            }
            TableEntry::Occupied(_) => unreachable!("renamed to a key already present"),
        }
    }

    /// Sorts the iteration order by value. The sort is stable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linprobe::OrderedMap;
    ///
    /// let mut map: OrderedMap<&str, i32> = OrderedMap::new();
    /// map.insert("x", 3);
    /// map.insert("y", 1);
    /// map.insert("z", 2);
    ///
    /// map.sort_by_values(|a, b| a.cmp(b));
    /// assert_eq!(map.order(), ["y", "z", "x"]);
    /// ```
    pub fn sort_by_values<F>(&mut self, mut compare: F)
    where
        F: FnMut(&V, &V) -> Ordering,
    {
        let table = &self.table;
        let hash_builder = &self.hash_builder;
        self.order.as_mut_slice().sort_by(|a, b| {
            compare(&lookup(table, hash_builder, a).1, &lookup(table, hash_builder, b).1)
        });
    }

    /// Shortens the map to its first `len` entries in order. Does nothing if
    /// the map is already that short.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len() {
            return;
        }
        for key in self.order.split_off(len) {
            take(&mut self.table, &self.hash_builder, &key);
        }
    }

    /// Keeps only the entries for which `f` returns `true`, visiting them in
    /// order.
    pub fn retain(&mut self, mut f: impl FnMut(&K, &mut V) -> bool) {
        let mut index = 0;
        while index < self.len() {
            let keep = match self.get_at_mut(index) {
                Some((k, v)) => f(k, v),
                None => break,
            };
            if keep {
                index += 1;
            } else {
                let key = self.order.remove(index);
                take(&mut self.table, &self.hash_builder, &key);
            }
        }
    }

    /// An iterator over the entries in order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linprobe::OrderedMap;
    ///
    /// let map: OrderedMap<i32, char> = [(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
    /// let pairs: Vec<_> = map.iter().collect();
    /// assert_eq!(pairs, [(&3, &'c'), (&1, &'a'), (&2, &'b')]);
    /// assert_eq!(map.iter().next_back(), Some((&2, &'b')));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V, S> {
        Iter {
            keys: self.order.iter(),
            table: &self.table,
            hash_builder: &self.hash_builder,
        }
    }

    /// An iterator over the entries in order, with mutable values.
    ///
    /// Builds a temporary position table before yielding anything, so this
    /// costs `O(len)` extra memory.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let keys = self.order.as_slice();
        let hash_builder = &self.hash_builder;

        let mut positions: HashTable<usize> = HashTable::with_capacity(keys.len());
        for (index, key) in keys.iter().enumerate() {
            positions
                .entry(hash_builder.hash_one(key), |_| false)
                .or_insert(index);
        }

        let mut slots: Vec<Option<(&K, &mut V)>> = (0..keys.len()).map(|_| None).collect();
        for (key, value) in self.table.iter_mut() {
            let hash = hash_builder.hash_one(&*key);
            if let Some(&index) = positions.find(hash, |&i| keys[i] == *key) {
                slots[index] = Some((&*key, value));
            }
        }

        IterMut {
            inner: slots.into_iter().flatten(),
        }
    }

    /// An iterator over the values in order.
    pub fn values(&self) -> Values<'_, K, V, S> {
        Values { inner: self.iter() }
    }

    /// An iterator over mutable values in order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Removes every entry, yielding them in order.
    ///
    /// The map is empty once the iterator is dropped, even if it was not
    /// consumed.
    pub fn drain(&mut self) -> Drain<'_, K, V, S> {
        let keys = self.order.split_off(0);
        Drain {
            keys: keys.into_iter(),
            table: &mut self.table,
            hash_builder: &self.hash_builder,
        }
    }

    /// Returns a cursor over the entries in order that can remove the entry
    /// it last returned.
    ///
    /// After a removal the cursor continues with the entry that moved into
    /// the removed position, so no entry is skipped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linprobe::BagOrder;
    /// use linprobe::DefaultHashBuilder;
    /// use linprobe::OrderedMap;
    ///
    /// let mut map: OrderedMap<i32, i32, DefaultHashBuilder, BagOrder> = (0..6).map(|i| (i, i)).collect();
    ///
    /// let mut cursor = map.cursor_mut();
    /// while let Some((&k, _)) = cursor.next() {
    ///     if k % 2 == 0 {
    ///         cursor.remove().unwrap();
    ///     }
    /// }
    /// assert_eq!(map.len(), 3);
    /// assert!(map.keys().all(|k| k % 2 == 1));
    /// ```
    pub fn cursor_mut(&mut self) -> CursorMut<'_, K, V, S, O> {
        CursorMut {
            map: self,
            next: 0,
            current: None,
        }
    }
}

impl<K, V, S, O> OrderedMap<K, V, S, O>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Default,
    O: OrderStrategy,
{
    /// Creates an empty map using the default hasher builder.
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates an empty map that holds at least `capacity` entries before
    /// growing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }

    /// Creates an empty map with the given capacity and load factor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLoadFactor`] if `load_factor` is not in
    /// `[1/1024, 1]`.
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f32) -> Result<Self, Error> {
        Self::with_capacity_load_factor_and_hasher(capacity, load_factor, S::default())
    }
}

impl<K, V, S, O> Default for OrderedMap<K, V, S, O>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Default,
    O: OrderStrategy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S, O> Debug for OrderedMap<K, V, S, O>
where
    K: Debug + Hash + Eq + Clone,
    V: Debug,
    S: BuildHasher,
    O: OrderStrategy,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Compares entries regardless of order.
impl<K, V, S, O> PartialEq for OrderedMap<K, V, S, O>
where
    K: Hash + Eq + Clone,
    V: PartialEq,
    S: BuildHasher,
    O: OrderStrategy,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S, O> Eq for OrderedMap<K, V, S, O>
where
    K: Hash + Eq + Clone,
    V: Eq,
    S: BuildHasher,
    O: OrderStrategy,
{
}

impl<K, V, S, O> FromIterator<(K, V)> for OrderedMap<K, V, S, O>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Default,
    O: OrderStrategy,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V, S, O> Extend<(K, V)> for OrderedMap<K, V, S, O>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
    O: OrderStrategy,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, S, O> IntoIterator for OrderedMap<K, V, S, O>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
    O: OrderStrategy,
{
    type IntoIter = IntoIter<K, V, S>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            keys: self.order.into_vec().into_iter(),
            table: self.table,
            hash_builder: self.hash_builder,
        }
    }
}

impl<'a, K, V, S, O> IntoIterator for &'a OrderedMap<K, V, S, O>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
    O: OrderStrategy,
{
    type IntoIter = Iter<'a, K, V, S>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A cursor over an [`OrderedMap`] that can remove the entry it last
/// returned.
pub struct CursorMut<'a, K, V, S, O> {
    map: &'a mut OrderedMap<K, V, S, O>,
    next: usize,
    current: Option<usize>,
}

impl<K, V, S, O> CursorMut<'_, K, V, S, O>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
    O: OrderStrategy,
{
    /// Returns `true` if a call to [`next`](Self::next) would return an
    /// entry.
    pub fn has_next(&self) -> bool {
        self.next < self.map.len()
    }

    /// Advances to the next entry in order.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<(&K, &mut V)> {
        if self.next >= self.map.len() {
            self.current = None;
            return None;
        }
        let index = self.next;
        self.next += 1;
        self.current = Some(index);
        self.map.get_at_mut(index)
    }

    /// Removes the entry last returned by [`next`](Self::next).
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoCurrentElement`] if there is no such entry.
    pub fn remove(&mut self) -> Result<(K, V), Error> {
        let index = self.current.take().ok_or(Error::NoCurrentElement)?;
        let entry = self.map.remove_at(index)?;
        self.next = index;
        Ok(entry)
    }

    /// Moves the cursor back before the first entry.
    pub fn reset(&mut self) {
        self.next = 0;
        self.current = None;
    }
}

/// An iterator over the entries of an [`OrderedMap`], in order.
pub struct Iter<'a, K, V, S> {
    keys: core::slice::Iter<'a, K>,
    table: &'a HashTable<(K, V)>,
    hash_builder: &'a S,
}

impl<'a, K, V, S> Iterator for Iter<'a, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        Some((key, &lookup(self.table, self.hash_builder, key).1))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<K, V, S> DoubleEndedIterator for Iter<'_, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        let key = self.keys.next_back()?;
        Some((key, &lookup(self.table, self.hash_builder, key).1))
    }
}

impl<K, V, S> ExactSizeIterator for Iter<'_, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
}

impl<K, V, S> FusedIterator for Iter<'_, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
}

/// A mutable iterator over the entries of an [`OrderedMap`], in order.
pub struct IterMut<'a, K, V> {
    inner: core::iter::Flatten<alloc::vec::IntoIter<Option<(&'a K, &'a mut V)>>>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

/// An iterator over the keys of an [`OrderedMap`], in order.
pub struct Keys<'a, K> {
    inner: core::slice::Iter<'a, K>,
}

impl<'a, K> Iterator for Keys<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> DoubleEndedIterator for Keys<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K> ExactSizeIterator for Keys<'_, K> {}

/// An iterator over the values of an [`OrderedMap`], in order.
pub struct Values<'a, K, V, S> {
    inner: Iter<'a, K, V, S>,
}

impl<'a, K, V, S> Iterator for Values<'a, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, S> DoubleEndedIterator for Values<'_, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

/// A mutable iterator over the values of an [`OrderedMap`], in order.
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

/// A draining iterator over the entries of an [`OrderedMap`], in order.
pub struct Drain<'a, K, V, S> {
    keys: alloc::vec::IntoIter<K>,
    table: &'a mut HashTable<(K, V)>,
    hash_builder: &'a S,
}

impl<K, V, S> Iterator for Drain<'_, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        Some(take(self.table, self.hash_builder, &key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<K, V, S> DoubleEndedIterator for Drain<'_, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        let key = self.keys.next_back()?;
        Some(take(self.table, self.hash_builder, &key))
    }
}

impl<K, V, S> Drop for Drain<'_, K, V, S> {
    fn drop(&mut self) {
        self.table.clear();
    }
}

/// A consuming iterator over the entries of an [`OrderedMap`], in order.
pub struct IntoIter<K, V, S> {
    keys: alloc::vec::IntoIter<K>,
    table: HashTable<(K, V)>,
    hash_builder: S,
}

impl<K, V, S> Iterator for IntoIter<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        Some(take(&mut self.table, &self.hash_builder, &key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<K, V, S> DoubleEndedIterator for IntoIter<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        let key = self.keys.next_back()?;
        Some(take(&mut self.table, &self.hash_builder, &key))
    }
}
