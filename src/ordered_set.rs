//! A hash set that remembers the order of its elements.
//!
//! Elements are stored in a [`HashTable`] for membership tests and in an
//! order index for iteration. See [`ordered_map`](crate::ordered_map) for how
//! the order strategy affects removal.

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::error::Error;
use crate::hash_table::Entry as TableEntry;
use crate::hash_table::HashTable;
use crate::hasher::DefaultHashBuilder;
use crate::order::ListOrder;
use crate::order::OrderIndex;
use crate::order::OrderStrategy;
use crate::sizing::LoadFactor;

fn equivalent<Q, T>(value: &Q) -> impl Fn(&T) -> bool + '_
where
    T: Borrow<Q>,
    Q: Eq + ?Sized,
{
    move |x| <T as Borrow<Q>>::borrow(x) == value
}

/// A hash set that iterates in the order of its order index.
///
/// # Examples
///
/// ```rust
/// use linprobe::OrderedSet;
///
/// let mut set: OrderedSet<&str> = OrderedSet::new();
/// set.insert("x");
/// set.insert("y");
/// set.insert("x");
/// set.insert_at(0, "w").unwrap();
///
/// assert_eq!(set.order(), ["w", "x", "y"]);
/// ```
#[derive(Clone)]
pub struct OrderedSet<T, S = DefaultHashBuilder, O = ListOrder> {
    table: HashTable<T>,
    order: OrderIndex<T, O>,
    hash_builder: S,
}

impl<T, S, O: OrderStrategy> OrderedSet<T, S, O> {
    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.order.len() == 0
    }

    /// Returns the number of slots in the underlying table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the number of elements at which the set grows.
    pub fn threshold(&self) -> usize {
        self.table.threshold()
    }

    /// Returns the set's load factor.
    pub fn load_factor(&self) -> f32 {
        self.table.load_factor()
    }

    /// Returns a reference to the set's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// The elements in iteration order.
    pub fn order(&self) -> &[T] {
        self.order.as_slice()
    }

    /// Returns the element at `index`, or `None` if `index >= len`.
    pub fn get_at(&self, index: usize) -> Option<&T> {
        self.order.get(index)
    }

    /// Returns the first element in the order.
    pub fn first(&self) -> Option<&T> {
        self.order.as_slice().first()
    }

    /// Returns the last element in the order.
    pub fn last(&self) -> Option<&T> {
        self.order.as_slice().last()
    }

    /// An iterator over the elements in order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.order.iter(),
        }
    }

    /// Removes every element. Keeps the allocated capacity.
    pub fn clear(&mut self) {
        self.table.clear();
        self.order.clear();
    }

    /// Reserves room for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
        self.order.reserve(additional);
    }

    /// Shrinks the table and the order index as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.table.shrink_to_fit();
        self.order.shrink_to_fit();
    }

    /// Removes every element, yielding them in order.
    pub fn drain(&mut self) -> Drain<'_, T> {
        self.table.clear();
        Drain {
            inner: self.order.split_off(0).into_iter(),
            _marker: PhantomData,
        }
    }

    /// Swaps the positions of the elements at `a` and `b`.
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

    /// Sorts the iteration order. The sort is stable.
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.order.as_mut_slice().sort();
    }

    /// Sorts the iteration order with a comparator. The sort is stable.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.order.as_mut_slice().sort_by(compare);
    }

    /// Randomly permutes the iteration order.
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

impl<T, S, O> OrderedSet<T, S, O>
where
    T: Hash + Eq + Clone,
    S: BuildHasher,
    O: OrderStrategy,
{
    /// Creates an empty set with the given hasher builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates an empty set that holds at least `capacity` elements before
    /// growing, using the given hasher builder.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            order: OrderIndex::with_capacity(capacity),
            hash_builder,
        }
    }

    /// Creates an empty set with the given capacity, load factor and hasher
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

    /// Adds `value` to the end of the order. Returns `false` if it was
    /// already present, in which case nothing changes.
    pub fn insert(&mut self, value: T) -> bool {
        let hash = self.hash_builder.hash_one(&value);
        match self.table.entry(hash, |v| v == &value) {
            TableEntry::Occupied(_) => false,
            TableEntry::Vacant(entry) => {
                entry.insert(value.clone());
                self.order.push(value);
                true
            }
        }
    }

    /// Places `value` at position `index`.
    ///
    /// A new element is inserted at `index`, which may equal `len`, and
    /// `Ok(true)` is returned. An element already present is moved to
    /// `index`, which must then be `< len`, and `Ok(false)` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index` is out of range.
    pub fn insert_at(&mut self, index: usize, value: T) -> Result<bool, Error> {
        let len = self.len();
        let hash = self.hash_builder.hash_one(&value);
        match self.table.entry(hash, |v| v == &value) {
            TableEntry::Occupied(_) => {
                Error::check_index(index, len)?;
                let Some(from) = self.order.position(&value) else {
                    unreachable!("table holds an element missing from the order index");
                };
                self.order.move_index(from, index);
                Ok(false)
            }
            TableEntry::Vacant(entry) => {
                Error::check_index(index, len + 1)?;
                entry.insert(value.clone());
                self.order.insert(index, value);
                Ok(true)
            }
        }
    }

    /// Returns `true` if the set contains `value`.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(value).is_some()
    }

    /// Returns the stored element equal to `value`.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(value);
        self.table.find(hash, equivalent(value))
    }

    /// Returns the position of `value` in the order. Scans the order index.
    pub fn position<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if !self.contains(value) {
            return None;
        }
        self.order.position(value)
    }

    /// Removes `value`. Returns `true` if it was present.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.take(value).is_some()
    }

    /// Removes and returns the stored element equal to `value`.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(value);
        let stored = self.table.remove(hash, equivalent(value))?;
        let Some(index) = self.order.position::<T>(&stored) else {
            unreachable!("table holds an element missing from the order index");
        };
        self.order.remove(index);
        Some(stored)
    }

    fn unlink(&mut self, value: &T) {
        let hash = self.hash_builder.hash_one(value);
        if self.table.remove(hash, |v| v == value).is_none() {
            unreachable!("order index holds an element missing from the table");
        }
    }

    /// Removes the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> Result<T, Error> {
        Error::check_index(index, self.len())?;
        let value = self.order.remove(index);
        self.unlink(&value);
        Ok(value)
    }

    /// Removes and returns the last element in the order.
    pub fn pop(&mut self) -> Option<T> {
        let value = self.order.pop()?;
        self.unlink(&value);
        Some(value)
    }

    /// Replaces `before` with `after` at the same position.
    ///
    /// Returns `false` and leaves the set unchanged if `before` is absent or
    /// `after` is already present.
    pub fn alter<Q>(&mut self, before: &Q, after: T) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.contains::<T>(&after) {
            return false;
        }
        match self.position(before) {
            Some(index) => {
                self.rename_at(index, after);
                true
            }
            None => false,
        }
    }

    /// Replaces the element at `index` with `after`.
    ///
    /// Returns `Ok(false)` and leaves the set unchanged if `after` is already
    /// present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= len`.
    pub fn alter_at(&mut self, index: usize, after: T) -> Result<bool, Error> {
        Error::check_index(index, self.len())?;
        if self.contains(&after) {
            return Ok(false);
        }
        self.rename_at(index, after);
        Ok(true)
    }

    fn rename_at(&mut self, index: usize, after: T) {
        let before = self.order.replace(index, after.clone());
        self.unlink(&before);
        let hash = self.hash_builder.hash_one(&after);
        self.table.entry(hash, |v| v == &after).or_insert(after);
    }

    /// Shortens the set to its first `len` elements in order.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len() {
            return;
        }
        for value in self.order.split_off(len) {
            self.unlink(&value);
        }
    }

    /// Keeps only the elements for which `f` returns `true`, visiting them in
    /// order.
    pub fn retain(&mut self, mut f: impl FnMut(&T) -> bool) {
        let mut index = 0;
        while let Some(value) = self.order.get(index) {
            if f(value) {
                index += 1;
            } else {
                let value = self.order.remove(index);
                self.unlink(&value);
            }
        }
    }

    /// Returns a cursor over the elements in order that can remove the
    /// element it last returned.
    pub fn cursor_mut(&mut self) -> CursorMut<'_, T, S, O> {
        CursorMut {
            set: self,
            next: 0,
            current: None,
        }
    }
}

impl<T, S, O> OrderedSet<T, S, O>
where
    T: Hash + Eq + Clone,
    S: BuildHasher + Default,
    O: OrderStrategy,
{
    /// Creates an empty set using the default hasher builder.
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates an empty set that holds at least `capacity` elements before
    /// growing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }

    /// Creates an empty set with the given capacity and load factor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLoadFactor`] if `load_factor` is not in
    /// `[1/1024, 1]`.
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f32) -> Result<Self, Error> {
        Self::with_capacity_load_factor_and_hasher(capacity, load_factor, S::default())
    }
}

impl<T, S, O> Default for OrderedSet<T, S, O>
where
    T: Hash + Eq + Clone,
    S: BuildHasher + Default,
    O: OrderStrategy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug, S, O: OrderStrategy> Debug for OrderedSet<T, S, O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Compares elements regardless of order.
impl<T, S, O> PartialEq for OrderedSet<T, S, O>
where
    T: Hash + Eq + Clone,
    S: BuildHasher,
    O: OrderStrategy,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|v| other.contains(v))
    }
}

impl<T, S, O> Eq for OrderedSet<T, S, O>
where
    T: Hash + Eq + Clone,
    S: BuildHasher,
    O: OrderStrategy,
{
}

impl<T, S, O> FromIterator<T> for OrderedSet<T, S, O>
where
    T: Hash + Eq + Clone,
    S: BuildHasher + Default,
    O: OrderStrategy,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = OrderedSet::new();
        set.extend(iter);
        set
    }
}

impl<T, S, O> Extend<T> for OrderedSet<T, S, O>
where
    T: Hash + Eq + Clone,
    S: BuildHasher,
    O: OrderStrategy,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T, S, O: OrderStrategy> IntoIterator for OrderedSet<T, S, O> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.order.into_vec().into_iter(),
        }
    }
}

impl<'a, T, S, O: OrderStrategy> IntoIterator for &'a OrderedSet<T, S, O> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A cursor over an [`OrderedSet`] that can remove the element it last
/// returned.
pub struct CursorMut<'a, T, S, O> {
    set: &'a mut OrderedSet<T, S, O>,
    next: usize,
    current: Option<usize>,
}

impl<T, S, O> CursorMut<'_, T, S, O>
where
    T: Hash + Eq + Clone,
    S: BuildHasher,
    O: OrderStrategy,
{
    /// Returns `true` if a call to [`next`](Self::next) would return an
    /// element.
    pub fn has_next(&self) -> bool {
        self.next < self.set.len()
    }

    /// Advances to the next element in order.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&T> {
        let index = self.next;
        if index >= self.set.len() {
            self.current = None;
            return None;
        }
        self.next += 1;
        self.current = Some(index);
        self.set.get_at(index)
    }

    /// Removes the element last returned by [`next`](Self::next). The
    /// cursor continues with the element that takes its position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoCurrentElement`] if there is no such element.
    pub fn remove(&mut self) -> Result<T, Error> {
        let index = self.current.take().ok_or(Error::NoCurrentElement)?;
        let value = self.set.remove_at(index)?;
        self.next = index;
        Ok(value)
    }

    /// Moves the cursor back before the first element.
    pub fn reset(&mut self) {
        self.next = 0;
        self.current = None;
    }
}

/// An iterator over the elements of an [`OrderedSet`], in order.
pub struct Iter<'a, T> {
    inner: core::slice::Iter<'a, T>,
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

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// A draining iterator over the elements of an [`OrderedSet`], in order.
pub struct Drain<'a, T> {
    inner: alloc::vec::IntoIter<T>,
    _marker: PhantomData<&'a mut T>,
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

impl<T> DoubleEndedIterator for Drain<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}

/// A consuming iterator over the elements of an [`OrderedSet`], in order.
pub struct IntoIter<T> {
    inner: alloc::vec::IntoIter<T>,
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

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
