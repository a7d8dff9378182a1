//! A set of items looked up by a key that each item holds.
//!
//! [`HolderSet`] stores whole items, but hashes and compares them by a key
//! extracted from each item. This is useful when items carry an identifier
//! (`user.id`, `node.name`) and should be found by it without building a
//! separate `HashMap<K, T>` that duplicates the key.
//!
//! Items are never handed out mutably, because changing an item's key while
//! it is stored would leave it in the wrong slot.

use core::borrow::Borrow;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::iter::FusedIterator;

use crate::error::Error;
use crate::hash_table;
use crate::hash_table::Entry as TableEntry;
use crate::hash_table::HashTable;
use crate::hasher::DefaultHashBuilder;
use crate::sizing::LoadFactor;

/// A set of items, unique by an extracted key.
///
/// # Examples
///
/// ```rust
/// use linprobe::HolderSet;
///
/// #[derive(Debug, PartialEq)]
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// fn name(user: &User) -> &str {
///     &user.name
/// }
///
/// let mut users: HolderSet<User, str> = HolderSet::with_extractor(name);
/// assert!(users.insert(User { name: "ada".into(), age: 36 }));
/// assert!(!users.insert(User { name: "ada".into(), age: 99 }));
///
/// assert_eq!(users.get("ada").map(|u| u.age), Some(36));
/// assert_eq!(users.remove("ada").map(|u| u.age), Some(36));
/// assert!(users.is_empty());
/// ```
///
/// The extractor returns a reference into the item, so the key must be
/// stored in the item rather than computed from it. A key derived from
/// several fields, or normalized (say, lowercased), is kept as a field of
/// its own:
///
/// ```rust
/// use linprobe::HolderSet;
///
/// struct Cell {
///     pos: (i32, i32),
///     glyph: char,
/// }
///
/// fn pos(cell: &Cell) -> &(i32, i32) {
///     &cell.pos
/// }
///
/// let mut grid: HolderSet<Cell, (i32, i32)> = HolderSet::with_extractor(pos);
/// grid.insert(Cell { pos: (0, 1), glyph: '#' });
/// grid.insert(Cell { pos: (2, 3), glyph: '.' });
///
/// assert_eq!(grid.get(&(2, 3)).map(|c| c.glyph), Some('.'));
/// assert!(!grid.contains_key(&(1, 0)));
/// ```
pub struct HolderSet<T, K: ?Sized, S = DefaultHashBuilder> {
    table: HashTable<T>,
    extractor: fn(&T) -> &K,
    hash_builder: S,
}

impl<T: Clone, K: ?Sized, S: Clone> Clone for HolderSet<T, K, S> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            extractor: self.extractor,
            hash_builder: self.hash_builder.clone(),
        }
    }
}

impl<T, K: ?Sized, S> HolderSet<T, K, S> {
    /// Returns the number of items in the set.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set holds no items.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of slots in the underlying table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the set's load factor.
    pub fn load_factor(&self) -> f32 {
        self.table.load_factor()
    }

    /// Returns the function that extracts keys from items.
    pub fn extractor(&self) -> fn(&T) -> &K {
        self.extractor
    }

    /// Returns a reference to the set's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes every item. Keeps the allocated capacity.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// An iterator over the items in arbitrary order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Removes every item, yielding them in arbitrary order.
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain {
            inner: self.table.drain(),
        }
    }

    /// Keeps only the items for which `f` returns `true`.
    pub fn retain(&mut self, mut f: impl FnMut(&T) -> bool) {
        self.table.retain(|item| f(item));
    }

    /// Returns a cursor over the items that can remove the item it last
    /// returned.
    pub fn cursor_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut {
            inner: self.table.cursor_mut(),
        }
    }
}

impl<T, K, S> HolderSet<T, K, S>
where
    K: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    /// Creates an empty set keyed by `extractor`, using the given hasher
    /// builder.
    pub fn with_extractor_and_hasher(extractor: fn(&T) -> &K, hash_builder: S) -> Self {
        Self::with_capacity_extractor_and_hasher(0, extractor, hash_builder)
    }

    /// Creates an empty set that holds at least `capacity` items before
    /// growing.
    pub fn with_capacity_extractor_and_hasher(
        capacity: usize,
        extractor: fn(&T) -> &K,
        hash_builder: S,
    ) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            extractor,
            hash_builder,
        }
    }

    fn hash_item(&self, item: &T) -> u64 {
        self.hash_builder.hash_one((self.extractor)(item))
    }

    /// Adds `item` unless an item with the same key is present. Returns
    /// `true` if it was added.
    pub fn insert(&mut self, item: T) -> bool {
        let extractor = self.extractor;
        let hash = self.hash_item(&item);
        let key = extractor(&item);
        match self.table.entry(hash, |x| extractor(x) == key) {
            TableEntry::Occupied(_) => false,
            TableEntry::Vacant(entry) => {
                entry.insert(item);
                true
            }
        }
    }

    /// Adds `item`, replacing and returning any item with the same key.
    pub fn replace(&mut self, item: T) -> Option<T> {
        let extractor = self.extractor;
        let hash = self.hash_item(&item);
        let key = extractor(&item);
        match self.table.entry(hash, |x| extractor(x) == key) {
            TableEntry::Occupied(mut entry) => Some(entry.replace(item)),
            TableEntry::Vacant(entry) => {
                entry.insert(item);
                None
            }
        }
    }

    /// Returns the item whose key equals `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let extractor = self.extractor;
        let hash = self.hash_builder.hash_one(key);
        self.table
            .find(hash, |x| <K as Borrow<Q>>::borrow(extractor(x)) == key)
    }

    /// Returns `true` if an item with key `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns `true` if an item with the same key as `item` is present.
    pub fn contains(&self, item: &T) -> bool {
        self.contains_key((self.extractor)(item))
    }

    /// Removes and returns the item whose key equals `key`.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let extractor = self.extractor;
        let hash = self.hash_builder.hash_one(key);
        self.table
            .remove(hash, |x| <K as Borrow<Q>>::borrow(extractor(x)) == key)
    }

    /// Reserves room for at least `additional` more items.
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
    }

    /// Shrinks the table as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.table.shrink_to_fit();
    }

    /// Returns probe statistics for the underlying table.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> hash_table::DebugStats {
        self.table.debug_stats()
    }
}

impl<T, K, S> HolderSet<T, K, S>
where
    K: Hash + Eq + ?Sized,
    S: BuildHasher + Default,
{
    /// Creates an empty set keyed by `extractor`.
    pub fn with_extractor(extractor: fn(&T) -> &K) -> Self {
        Self::with_extractor_and_hasher(extractor, S::default())
    }

    /// Creates an empty set keyed by `extractor` that holds at least
    /// `capacity` items before growing.
    pub fn with_capacity_and_extractor(capacity: usize, extractor: fn(&T) -> &K) -> Self {
        Self::with_capacity_extractor_and_hasher(capacity, extractor, S::default())
    }

    /// Creates an empty set with the given capacity and load factor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLoadFactor`] if `load_factor` is not in
    /// `[1/1024, 1]`.
    pub fn with_capacity_load_factor_and_extractor(
        capacity: usize,
        load_factor: f32,
        extractor: fn(&T) -> &K,
    ) -> Result<Self, Error> {
        Ok(Self {
            table: HashTable::with_sizing(capacity, LoadFactor::new(load_factor)?),
            extractor,
            hash_builder: S::default(),
        })
    }
}

impl<T: Debug, K: ?Sized, S> Debug for HolderSet<T, K, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Two holder sets are equal when they hold equal items under the same keys.
impl<T, K, S> PartialEq for HolderSet<T, K, S>
where
    T: PartialEq,
    K: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|item| other.get((self.extractor)(item)) == Some(item))
    }
}

impl<T, K, S> Eq for HolderSet<T, K, S>
where
    T: Eq,
    K: Hash + Eq + ?Sized,
    S: BuildHasher,
{
}

/// Items whose key is already present are skipped.
impl<T, K, S> Extend<T> for HolderSet<T, K, S>
where
    K: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T, K: ?Sized, S> IntoIterator for HolderSet<T, K, S> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, T, K: ?Sized, S> IntoIterator for &'a HolderSet<T, K, S> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A cursor over a [`HolderSet`] that can remove the item it last returned.
pub struct CursorMut<'a, T> {
    inner: hash_table::CursorMut<'a, T>,
}

impl<T> CursorMut<'_, T> {
    /// Returns `true` if a call to [`next`](Self::next) would return an item.
    pub fn has_next(&self) -> bool {
        self.inner.has_next()
    }

    /// Advances to the next item.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&T> {
        self.inner.next().map(|item| &*item)
    }

    /// Removes the item last returned by [`next`](Self::next).
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoCurrentElement`] if there is no such item.
    pub fn remove(&mut self) -> Result<T, Error> {
        self.inner.remove()
    }

    /// Moves the cursor back to its starting slot.
    pub fn reset(&mut self) {
        self.inner.reset();
    }
}

/// An iterator over the items of a [`HolderSet`].
pub struct Iter<'a, T> {
    inner: hash_table::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// A draining iterator over the items of a [`HolderSet`].
pub struct Drain<'a, T> {
    inner: hash_table::Drain<'a, T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}

/// A consuming iterator over the items of a [`HolderSet`].
pub struct IntoIter<T> {
    inner: hash_table::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;

    #[derive(Clone)]
    struct SipHashBuilder {
        k1: u64,
        k2: u64,
    }

    impl BuildHasher for SipHashBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new_with_keys(self.k1, self.k2)
        }
    }

    impl Default for SipHashBuilder {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k1: rng.try_next_u64().unwrap_or(0),
                k2: rng.try_next_u64().unwrap_or(0),
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Item {
        id: u32,
        label: String,
    }

    fn item(id: u32, label: &str) -> Item {
        Item {
            id,
            label: label.to_string(),
        }
    }

    fn id(item: &Item) -> &u32 {
        &item.id
    }

    fn label(item: &Item) -> &str {
        &item.label
    }

    type Holder<K> = HolderSet<Item, K, SipHashBuilder>;

    #[test]
    fn test_insert_keeps_first() {
        let mut set: Holder<u32> = HolderSet::with_extractor(id);
        assert!(set.insert(item(1, "one")));
        assert!(!set.insert(item(1, "uno")));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(&1).map(|i| i.label.as_str()), Some("one"));
        assert!(set.contains(&item(1, "anything")));
        assert!(!set.contains_key(&2));
    }

    #[test]
    fn test_replace() {
        let mut set: Holder<u32> = HolderSet::with_extractor(id);
        assert_eq!(set.replace(item(1, "one")), None);
        assert_eq!(set.replace(item(1, "uno")), Some(item(1, "one")));
        assert_eq!(set.get(&1), Some(&item(1, "uno")));
    }

    #[test]
    fn test_unsized_key_lookup() {
        let mut set: Holder<str> = HolderSet::with_extractor(label);
        for i in 0..100 {
            set.insert(item(i, &format!("item-{i}")));
        }
        assert_eq!(set.get("item-42").map(|i| i.id), Some(42));
        assert_eq!(set.remove("item-42").map(|i| i.id), Some(42));
        assert_eq!(set.remove("item-42"), None);
        assert_eq!(set.len(), 99);
        set.table.assert_probe_invariant();
    }

    #[test]
    fn test_retain_cursor_drain() {
        let mut set: Holder<u32> = HolderSet::with_capacity_and_extractor(64, id);
        set.extend((0..40).map(|i| item(i, "x")));
        set.retain(|i| i.id % 2 == 0);
        assert_eq!(set.len(), 20);

        let mut cursor = set.cursor_mut();
        assert_eq!(cursor.remove(), Err(Error::NoCurrentElement));
        let mut visited = 0;
        while let Some(i) = cursor.next() {
            visited += 1;
            if i.id < 20 {
                cursor.remove().unwrap();
            }
        }
        assert_eq!(visited, 20);
        assert_eq!(set.len(), 10);

        let mut ids: Vec<u32> = set.drain().map(|i| i.id).collect();
        ids.sort();
        assert_eq!(ids, (20..40).step_by(2).collect::<Vec<_>>());
        assert!(set.is_empty());
    }

    #[test]
    fn test_equality_and_load_factor() {
        let mut a: Holder<u32> =
            HolderSet::with_capacity_load_factor_and_extractor(4, 0.5, id).unwrap();
        let mut b: Holder<u32> = HolderSet::with_extractor(id);
        a.extend([item(1, "a"), item(2, "b")]);
        b.extend([item(2, "b"), item(1, "a")]);
        assert_eq!(a, b);
        b.replace(item(2, "c"));
        assert_ne!(a, b);
        assert_eq!(a.load_factor(), 0.5);
        assert!(Holder::<u32>::with_capacity_load_factor_and_extractor(4, 1.5, id).is_err());
    }

    #[test]
    fn test_composite_key_field() {
        struct Edge {
            ends: (u32, u32),
            weight: u32,
        }

        fn ends(edge: &Edge) -> &(u32, u32) {
            &edge.ends
        }

        let mut edges: HolderSet<Edge, (u32, u32), SipHashBuilder> = HolderSet::with_extractor(ends);
        for a in 0..10 {
            edges.insert(Edge {
                ends: (a, a + 1),
                weight: a * 10,
            });
        }
        assert_eq!(edges.get(&(3, 4)).map(|e| e.weight), Some(30));
        assert!(edges.get(&(4, 3)).is_none());
        assert_eq!(edges.remove(&(9, 10)).map(|e| e.weight), Some(90));
        assert_eq!(edges.len(), 9);
        edges.table.assert_probe_invariant();
    }
}
