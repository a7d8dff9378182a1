use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::error::Error;
use crate::sizing;
use crate::sizing::LoadFactor;

/// An occupied slot: the element together with the full hash it was inserted
/// under. Keeping the hash lets resizes and backward shifts recompute a
/// slot's home without access to the hasher.
#[derive(Clone)]
struct Bucket<V> {
    hash: u64,
    value: V,
}

fn empty_buckets<V>(capacity: usize) -> Box<[Option<Bucket<V>>]> {
    (0..capacity).map(|_| None).collect()
}

/// Probe statistics for hash table analysis.
///
/// Available in tests and with the `stats` feature.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of elements currently in the table
    pub len: usize,
    /// Total number of slots allocated
    pub capacity: usize,
    /// Number of elements the table holds before it grows
    pub threshold: usize,
    /// Configured load factor
    pub load_factor: f32,
    /// Slot utilization (len / capacity)
    pub occupancy: f64,
    /// Longest distance between an element's home slot and its actual slot
    pub max_probe_length: usize,
    /// Mean distance between an element's home slot and its actual slot
    pub mean_probe_length: f64,
    /// Current hash multiplier
    pub hash_multiplier: u64,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Debug Statistics ===");
        println!(
            "Population: {}/{} slots ({:.2}% occupied, grows at {}, load factor {})",
            self.len,
            self.capacity,
            self.occupancy * 100.0,
            self.threshold,
            self.load_factor
        );
        println!(
            "Probe length: max {}, mean {:.3}",
            self.max_probe_length, self.mean_probe_length
        );
        println!("Multiplier: {:#018x}", self.hash_multiplier);
    }
}

/// An open-addressing hash table using linear probing.
///
/// `HashTable<V>` stores values of type `V` in a power-of-two array of slots.
/// Like the tables underneath the map and set types, it never hashes values
/// itself: every operation takes the value's hash and an equality predicate.
///
/// A hash is mixed by multiplying it with a per-table odd multiplier and
/// keeping the top bits. The multiplier is re-derived on every resize, so a
/// key set that happens to cluster under one multiplier is unlikely to keep
/// clustering after the table grows. Removal uses backward-shift deletion
/// instead of tombstones, so probe runs never accumulate dead slots.
///
/// The table grows once its length reaches `floor(capacity * load_factor)`
/// and always keeps at least one slot empty.
///
/// ## Example
///
/// ```rust
/// # use core::hash::Hash;
/// # use core::hash::Hasher;
/// #
/// # use linprobe::hash_table::HashTable;
/// # use siphasher::sip::SipHasher;
/// #
/// # #[derive(Debug, PartialEq)]
/// # struct Person {
/// #     id: u64,
/// #     name: String,
/// # }
/// #
/// # fn hash_id(id: u64) -> u64 {
/// #     let mut hasher = SipHasher::new();
/// #     id.hash(&mut hasher);
/// #     hasher.finish()
/// # }
///
/// let mut table = HashTable::with_capacity(100);
/// let hash = hash_id(123);
///
/// // Insert a person
/// match table.entry(hash, |p: &Person| p.id == 123) {
///     linprobe::hash_table::Entry::Vacant(entry) => {
///         entry.insert(Person {
///             id: 123,
///             name: "Alice".to_string(),
///         });
///     }
///     linprobe::hash_table::Entry::Occupied(_) => {
///         println!("Person already exists");
///     }
/// }
/// ```
#[derive(Clone)]
pub struct HashTable<V> {
    buckets: Box<[Option<Bucket<V>>]>,

    len: usize,
    threshold: usize,
    mask: usize,
    shift: u32,
    hash_multiplier: u64,
    load_factor: LoadFactor,
}

impl<V> Debug for HashTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use alloc::format;
        use alloc::string::String;

        let cells = (0..self.capacity())
            .map(|index| match &self.buckets[index] {
                None => String::from(".."),
                Some(_) => format!("{:02}", self.probe_length(index).min(99)),
            })
            .collect::<Vec<_>>();
        let slots = cells
            .chunks(16)
            .map(|row| row.join(" "))
            .collect::<Vec<_>>();

        f.debug_struct("HashTable")
            .field("probe_lengths", &slots)
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("threshold", &self.threshold)
            .field("hash_multiplier", &format!("{:#018x}", self.hash_multiplier))
            .finish()
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> HashTable<V> {
    /// Creates an empty table with the minimum capacity and the default load
    /// factor.
    pub fn new() -> Self {
        Self::with_sizing(0, LoadFactor::DEFAULT)
    }

    /// Creates a new hash table that holds at least `capacity` elements
    /// before it needs to grow.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use linprobe::hash_table::HashTable;
    /// #
    /// // Create a table that can hold at least 100 items without resizing
    /// let table: HashTable<String> = HashTable::with_capacity(100);
    /// assert!(table.threshold() > 100);
    /// assert!(table.capacity().is_power_of_two());
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_sizing(capacity, LoadFactor::DEFAULT)
    }

    /// Creates a new hash table that holds at least `capacity` elements
    /// before it grows, filling at most `load_factor` of its slots.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLoadFactor`] if `load_factor` is not in
    /// `[1/1024, 1]`. Nothing is allocated in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use linprobe::hash_table::HashTable;
    /// # use linprobe::Error;
    /// #
    /// let table: HashTable<u32> = HashTable::with_capacity_and_load_factor(10, 0.5)?;
    /// assert_eq!(table.load_factor(), 0.5);
    ///
    /// let bad = HashTable::<u32>::with_capacity_and_load_factor(10, 1.5);
    /// assert_eq!(bad.err(), Some(Error::InvalidLoadFactor(1.5)));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f32) -> Result<Self, Error> {
        let load_factor = LoadFactor::new(load_factor)?;
        Ok(Self::with_sizing(capacity, load_factor))
    }

    pub(crate) fn with_sizing(capacity: usize, load_factor: LoadFactor) -> Self {
        let capacity = sizing::capacity_for(capacity, load_factor);
        let mask = capacity - 1;

        Self {
            buckets: empty_buckets(capacity),
            len: 0,
            threshold: sizing::threshold(capacity, load_factor),
            mask,
            shift: sizing::shift_for(mask),
            hash_multiplier: sizing::INITIAL_MULTIPLIER,
            load_factor,
        }
    }

    /// Returns the number of elements in the table.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table contains no elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use linprobe::hash_table::HashTable;
    /// #
    /// let table: HashTable<i32> = HashTable::with_capacity(10);
    /// assert!(table.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots in the table. Always a power of two.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the number of elements at which the table grows.
    ///
    /// This is `floor(capacity * load_factor)`, clamped so that at least one
    /// slot always stays empty.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Returns the load factor the table was created with.
    pub fn load_factor(&self) -> f32 {
        self.load_factor.get()
    }

    /// Returns the multiplier currently used to mix hashes.
    ///
    /// The multiplier is always odd and changes every time the table is
    /// resized.
    pub fn hash_multiplier(&self) -> u64 {
        self.hash_multiplier
    }

    /// Home slot for `hash`: the top bits of `hash * multiplier`.
    #[inline(always)]
    fn place(&self, hash: u64) -> usize {
        (hash.wrapping_mul(self.hash_multiplier) >> self.shift) as usize
    }

    /// Linear probe for a value matching `hash` and `eq`.
    ///
    /// Returns `Ok(slot)` if the value is present, or `Err(slot)` with the
    /// first empty slot of the probe run, the same convention as
    /// `slice::binary_search`. Terminates because a table always has an empty
    /// slot.
    #[inline]
    fn locate(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Result<usize, usize> {
        let mut index = self.place(hash);
        loop {
            match &self.buckets[index] {
                None => return Err(index),
                Some(bucket) if bucket.hash == hash && eq(&bucket.value) => return Ok(index),
                Some(_) => index = (index + 1) & self.mask,
            }
        }
    }

    #[inline]
    fn value(&self, index: usize) -> &V {
        match &self.buckets[index] {
            Some(bucket) => &bucket.value,
            None => unreachable!("slot {index} is empty"),
        }
    }

    #[inline]
    fn value_mut(&mut self, index: usize) -> &mut V {
        match &mut self.buckets[index] {
            Some(bucket) => &mut bucket.value,
            None => unreachable!("slot {index} is empty"),
        }
    }

    /// Distance between the element in `index` and its home slot.
    fn probe_length(&self, index: usize) -> usize {
        match &self.buckets[index] {
            Some(bucket) => index.wrapping_sub(self.place(bucket.hash)) & self.mask,
            None => 0,
        }
    }

    /// Finds a value in the table by hash and equality predicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use linprobe::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_u64(n: u64) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     n.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table.entry(hash_u64(42), |&n: &u64| n == 42).or_insert(42);
    ///
    /// assert_eq!(table.find(hash_u64(42), |&n| n == 42), Some(&42));
    /// assert_eq!(table.find(hash_u64(99), |&n| n == 99), None);
    /// ```
    #[inline]
    pub fn find(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&V> {
        match self.locate(hash, eq) {
            Ok(index) => Some(self.value(index)),
            Err(_) => None,
        }
    }

    /// Finds a value in the table by hash and equality predicate and returns
    /// a mutable reference to it.
    #[inline]
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&mut V> {
        match self.locate(hash, eq) {
            Ok(index) => Some(self.value_mut(index)),
            Err(_) => None,
        }
    }

    /// Gets an entry for the given hash and equality predicate.
    ///
    /// A vacant entry remembers the empty slot found by the probe, so
    /// inserting through it does not probe again.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use linprobe::hash_table::Entry;
    /// # use linprobe::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = hash_str("hello");
    ///
    /// match table.entry(hash, |s: &String| s == "hello") {
    ///     Entry::Vacant(entry) => {
    ///         entry.insert("hello".to_string());
    ///     }
    ///     Entry::Occupied(mut entry) => {
    ///         entry.get_mut().push('!');
    ///     }
    /// }
    /// assert_eq!(table.len(), 1);
    /// ```
    #[inline]
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Entry<'_, V> {
        match self.locate(hash, eq) {
            Ok(index) => Entry::Occupied(OccupiedEntry { table: self, index }),
            Err(index) => Entry::Vacant(VacantEntry {
                table: self,
                hash,
                index,
            }),
        }
    }

    /// Writes a new element into the empty slot `index` and grows the table
    /// if it reached its threshold. Returns the slot the element ends up in.
    fn insert_vacant(&mut self, index: usize, hash: u64, value: V) -> usize {
        debug_assert!(self.buckets[index].is_none());
        self.buckets[index] = Some(Bucket { hash, value });
        self.len += 1;

        if self.len >= self.threshold {
            let capacity = sizing::grown_capacity(self.capacity(), self.len, self.load_factor);
            if let Some(moved) = self.resize(capacity, Some(index)) {
                return moved;
            }
        }

        index
    }

    /// Places a bucket known to be absent from the table. Skips the equality
    /// checks and the length and threshold bookkeeping.
    fn insert_unique(&mut self, bucket: Bucket<V>) -> usize {
        let mut index = self.place(bucket.hash);
        while self.buckets[index].is_some() {
            index = (index + 1) & self.mask;
        }
        self.buckets[index] = Some(bucket);
        index
    }

    /// Moves every element into a table of `capacity` slots under a freshly
    /// derived multiplier.
    ///
    /// If `tracked` names an occupied slot, returns where that slot's element
    /// was moved.
    #[cold]
    fn resize(&mut self, capacity: usize, tracked: Option<usize>) -> Option<usize> {
        debug_assert!(capacity.is_power_of_two());
        debug_assert!(sizing::threshold(capacity, self.load_factor) > self.len);

        let old = core::mem::replace(&mut self.buckets, empty_buckets(capacity));
        let old_capacity = old.len();
        self.mask = capacity - 1;
        self.shift = sizing::shift_for(self.mask);
        self.threshold = sizing::threshold(capacity, self.load_factor);
        self.hash_multiplier = sizing::next_multiplier(self.hash_multiplier, self.len);

        log::trace!(
            "resizing hash table from {} to {} slots ({} entries, multiplier {:#018x})",
            old_capacity,
            capacity,
            self.len,
            self.hash_multiplier
        );

        let mut moved = None;
        for (index, bucket) in old.into_vec().into_iter().enumerate() {
            if let Some(bucket) = bucket {
                let new_index = self.insert_unique(bucket);
                if tracked == Some(index) {
                    moved = Some(new_index);
                }
            }
        }

        moved
    }

    /// Removes the element in `index` using backward-shift deletion.
    ///
    /// Walking forward from the gap, an element whose home slot lies at or
    /// before the gap (cyclically) is moved into it, and the slot it left
    /// becomes the new gap. The walk stops at the first empty slot, so every
    /// remaining element stays reachable from its home without tombstones.
    fn remove_slot(&mut self, index: usize) -> V {
        let removed = match self.buckets[index].take() {
            Some(bucket) => bucket.value,
            None => unreachable!("slot {index} is empty"),
        };

        let mask = self.mask;
        let mut gap = index;
        let mut next = (index + 1) & mask;
        while let Some(hash) = self.buckets[next].as_ref().map(|bucket| bucket.hash) {
            let home = self.place(hash);
            if (next.wrapping_sub(home) & mask) > (gap.wrapping_sub(home) & mask) {
                self.buckets[gap] = self.buckets[next].take();
                gap = next;
            }
            next = (next + 1) & mask;
        }

        self.len -= 1;
        removed
    }

    /// Removes and returns a value from the table.
    ///
    /// The value is identified by its hash and an equality predicate. Returns
    /// `None` if no value matches; that is not an error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use linprobe::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_u64(n: u64) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     n.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table.entry(hash_u64(42), |&n: &u64| n == 42).or_insert(42);
    ///
    /// assert_eq!(table.remove(hash_u64(42), |&n| n == 42), Some(42));
    /// assert!(table.is_empty());
    /// assert_eq!(table.remove(hash_u64(42), |&n| n == 42), None);
    /// ```
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<V> {
        match self.locate(hash, eq) {
            Ok(index) => Some(self.remove_slot(index)),
            Err(_) => None,
        }
    }

    /// Removes all elements from the table, keeping its capacity and
    /// multiplier.
    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            *bucket = None;
        }
        self.len = 0;
    }

    /// Reserves room for at least `additional` more elements.
    ///
    /// After this call, inserting `additional` new elements does not resize
    /// the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use linprobe::hash_table::HashTable;
    /// #
    /// let mut table: HashTable<i32> = HashTable::new();
    /// table.reserve(50);
    /// assert!(table.threshold() > 50);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        let required = self.len.checked_add(additional).expect("capacity overflow");
        if required >= self.threshold {
            let capacity = sizing::capacity_for(required, self.load_factor);
            self.resize(capacity, None);
        }
    }

    /// Shrinks the table to the smallest capacity that holds its current
    /// elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use linprobe::hash_table::HashTable;
    /// #
    /// let mut table: HashTable<i32> = HashTable::with_capacity(1000);
    /// table.entry(42, |&v| v == 5).or_insert(5);
    ///
    /// table.shrink_to_fit();
    /// assert!(table.capacity() < 1000);
    /// assert_eq!(table.find(42, |&v| v == 5), Some(&5));
    /// ```
    pub fn shrink_to_fit(&mut self) {
        let capacity = sizing::capacity_for(self.len, self.load_factor);
        if capacity < self.capacity() {
            log::debug!(
                "shrinking hash table from {} to {} slots",
                self.capacity(),
                capacity
            );
            self.resize(capacity, None);
        }
    }

    /// Keeps only the elements for which `f` returns `true`.
    pub fn retain(&mut self, mut f: impl FnMut(&mut V) -> bool) {
        let mut cursor = self.cursor_mut();
        while let Some(value) = cursor.next() {
            if !f(value) && cursor.remove().is_err() {
                unreachable!("cursor lost the element it just returned");
            }
        }
    }

    /// Returns an iterator over all values in the table, in slot order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use linprobe::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table.entry(1, |&v: &u32| v == 1).or_insert(1);
    /// table.entry(2, |&v: &u32| v == 2).or_insert(2);
    ///
    /// assert_eq!(table.iter().sum::<u32>(), 3);
    /// ```
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.buckets.iter(),
            remaining: self.len,
        }
    }

    /// Returns an iterator over mutable references to all values.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            inner: self.buckets.iter_mut(),
            remaining: self.len,
        }
    }

    /// Returns an iterator that removes and yields all values from the table.
    ///
    /// The table is empty as soon as `drain` returns, keeping its capacity.
    /// Values not consumed by the iterator are dropped with it.
    pub fn drain(&mut self) -> Drain<'_, V> {
        let capacity = self.capacity();
        let buckets = core::mem::replace(&mut self.buckets, empty_buckets(capacity));
        let remaining = core::mem::replace(&mut self.len, 0);
        Drain {
            inner: buckets.into_vec().into_iter(),
            remaining,
            _table: PhantomData,
        }
    }

    /// Returns a cursor that walks the table and can remove the element it
    /// last returned.
    ///
    /// Only one cursor can exist at a time since it borrows the table
    /// mutably:
    ///
    /// ```rust,compile_fail
    /// # use linprobe::hash_table::HashTable;
    /// let mut table: HashTable<u32> = HashTable::new();
    /// let mut first = table.cursor_mut();
    /// let mut second = table.cursor_mut();
    /// first.next();
    /// second.next();
    /// ```
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use linprobe::hash_table::HashTable;
    /// # use linprobe::Error;
    /// #
    /// let mut table = HashTable::with_capacity(16);
    /// for v in 0..10u64 {
    ///     table.entry(v, |&x| x == v).or_insert(v);
    /// }
    ///
    /// let mut cursor = table.cursor_mut();
    /// assert_eq!(cursor.remove(), Err(Error::NoCurrentElement));
    /// while let Some(v) = cursor.next() {
    ///     if *v % 2 == 0 {
    ///         cursor.remove()?;
    ///     }
    /// }
    /// assert_eq!(table.len(), 5);
    /// # Ok::<(), Error>(())
    /// ```
    pub fn cursor_mut(&mut self) -> CursorMut<'_, V> {
        CursorMut::new(self)
    }

    /// Computes a histogram of probe lengths for the current table state.
    ///
    /// Entry `d` counts the elements stored `d` slots past their home slot.
    /// Available in tests and with the `stats` feature.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> Vec<usize> {
        let mut hist = Vec::new();
        for index in 0..self.capacity() {
            if self.buckets[index].is_none() {
                continue;
            }
            let length = self.probe_length(index);
            if hist.len() <= length {
                hist.resize(length + 1, 0);
            }
            hist[length] += 1;
        }
        hist
    }

    /// Returns probe and utilization statistics for debugging.
    ///
    /// Available in tests and with the `stats` feature.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        let hist = self.probe_histogram();
        let total: usize = hist.iter().enumerate().map(|(d, count)| d * count).sum();

        DebugStats {
            len: self.len,
            capacity: self.capacity(),
            threshold: self.threshold,
            load_factor: self.load_factor.get(),
            occupancy: self.len as f64 / self.capacity() as f64,
            max_probe_length: hist.len().saturating_sub(1),
            mean_probe_length: if self.len == 0 {
                0.0
            } else {
                total as f64 / self.len as f64
            },
            hash_multiplier: self.hash_multiplier,
        }
    }

    /// Panics unless every element is reachable from its home slot without
    /// crossing an empty slot, and `len` matches the occupied slots.
    #[cfg(test)]
    pub(crate) fn assert_probe_invariant(&self) {
        let mut occupied = 0;
        for index in 0..self.capacity() {
            let Some(bucket) = &self.buckets[index] else {
                continue;
            };
            occupied += 1;
            let mut probe = self.place(bucket.hash);
            while probe != index {
                assert!(
                    self.buckets[probe].is_some(),
                    "slot {index} unreachable: empty slot {probe} in its probe run"
                );
                probe = (probe + 1) & self.mask;
            }
        }
        assert_eq!(occupied, self.len);
        assert!(self.len < self.threshold);
        assert_eq!(self.hash_multiplier & 1, 1);
    }
}

/// A view into a single entry in the hash table, which may be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashTable`].
///
/// [`entry`]: HashTable::entry
pub enum Entry<'a, V> {
    /// A vacant entry - no matching value is present in the table
    Vacant(VacantEntry<'a, V>),
    /// An occupied entry - a matching value is present in the table
    Occupied(OccupiedEntry<'a, V>),
}

impl<'a, V> Entry<'a, V> {
    /// Inserts `default` if the entry is vacant and returns a mutable
    /// reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use linprobe::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// assert_eq!(*table.entry(7, |&v: &u8| v == 7).or_insert(7), 7);
    /// assert_eq!(*table.entry(7, |&v: &u8| v == 7).or_insert(9), 7);
    /// ```
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts the result of `default` if the entry is vacant and returns a
    /// mutable reference to the value in the entry.
    pub fn or_insert_with(self, default: impl FnOnce() -> V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts.
    pub fn and_modify(self, f: impl FnOnce(&mut V)) -> Self {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }
}

impl<'a, V> Entry<'a, V>
where
    V: Default,
{
    /// Inserts `V::default()` if the entry is vacant and returns a mutable
    /// reference to the value in the entry.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(V::default)
    }
}

/// A view into a vacant entry in a [`HashTable`].
pub struct VacantEntry<'a, V> {
    table: &'a mut HashTable<V>,
    hash: u64,
    index: usize,
}

impl<'a, V> VacantEntry<'a, V> {
    /// Inserts a value into the vacant entry and returns a mutable reference
    /// to it.
    ///
    /// The table grows after the insertion if it reached its threshold.
    pub fn insert(self, value: V) -> &'a mut V {
        let index = self.table.insert_vacant(self.index, self.hash, value);
        self.table.value_mut(index)
    }
}

/// A view into an occupied entry in a [`HashTable`].
pub struct OccupiedEntry<'a, V> {
    table: &'a mut HashTable<V>,
    index: usize,
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        self.table.value(self.index)
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        self.table.value_mut(self.index)
    }

    /// Converts the entry into a mutable reference to the value with the
    /// lifetime of the entry.
    pub fn into_mut(self) -> &'a mut V {
        self.table.value_mut(self.index)
    }

    /// Replaces the value in the entry, returning the old one.
    pub fn replace(&mut self, value: V) -> V {
        core::mem::replace(self.get_mut(), value)
    }

    /// Removes the entry from the table and returns the value.
    pub fn remove(self) -> V {
        self.table.remove_slot(self.index)
    }
}

/// An iterator over the values in a [`HashTable`], in slot order.
///
/// This struct is created by the [`iter`] method on [`HashTable`].
///
/// [`iter`]: HashTable::iter
pub struct Iter<'a, V> {
    inner: core::slice::Iter<'a, Option<Bucket<V>>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        for bucket in self.inner.by_ref() {
            if let Some(bucket) = bucket {
                self.remaining -= 1;
                return Some(&bucket.value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

/// A mutable iterator over the values in a [`HashTable`].
///
/// This struct is created by the [`iter_mut`] method on [`HashTable`].
///
/// [`iter_mut`]: HashTable::iter_mut
pub struct IterMut<'a, V> {
    inner: core::slice::IterMut<'a, Option<Bucket<V>>>,
    remaining: usize,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        for bucket in self.inner.by_ref() {
            if let Some(bucket) = bucket {
                self.remaining -= 1;
                return Some(&mut bucket.value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}

impl<V> FusedIterator for IterMut<'_, V> {}

/// A draining iterator over the values in a [`HashTable`].
///
/// This struct is created by the [`drain`] method on [`HashTable`].
///
/// [`drain`]: HashTable::drain
pub struct Drain<'a, V> {
    inner: alloc::vec::IntoIter<Option<Bucket<V>>>,
    remaining: usize,
    _table: PhantomData<&'a mut HashTable<V>>,
}

impl<V> Iterator for Drain<'_, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        for bucket in self.inner.by_ref() {
            if let Some(bucket) = bucket {
                self.remaining -= 1;
                return Some(bucket.value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Drain<'_, V> {}

impl<V> FusedIterator for Drain<'_, V> {}

/// An owning iterator over the values of a [`HashTable`].
pub struct IntoIter<V> {
    inner: alloc::vec::IntoIter<Option<Bucket<V>>>,
    remaining: usize,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        for bucket in self.inner.by_ref() {
            if let Some(bucket) = bucket {
                self.remaining -= 1;
                return Some(bucket.value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V> FusedIterator for IntoIter<V> {}

impl<V> IntoIterator for HashTable<V> {
    type IntoIter = IntoIter<V>;
    type Item = V;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.buckets.into_vec().into_iter(),
            remaining: self.len,
        }
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type IntoIter = Iter<'a, V>;
    type Item = &'a V;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A cursor over a [`HashTable`] that can remove the element it last
/// returned.
///
/// The cursor starts one slot past an empty slot and visits every slot once,
/// wrapping around the end of the table. Removal never fills an empty slot,
/// so no probe run crosses the cursor's starting point, and backward shifts
/// only pull not-yet-visited elements toward the cursor. When an element is
/// shifted into the slot just removed, the cursor visits that slot again.
/// Every element present when the cursor was created, and not removed
/// through it, is returned exactly once.
///
/// This struct is created by the [`cursor_mut`] method on [`HashTable`].
///
/// [`cursor_mut`]: HashTable::cursor_mut
pub struct CursorMut<'a, V> {
    table: &'a mut HashTable<V>,
    start: usize,
    next_offset: usize,
    current: Option<usize>,
}

impl<'a, V> CursorMut<'a, V> {
    fn new(table: &'a mut HashTable<V>) -> Self {
        let empty = table
            .buckets
            .iter()
            .position(Option::is_none)
            .unwrap_or(table.mask);
        Self {
            start: (empty + 1) & table.mask,
            table,
            next_offset: 0,
            current: None,
        }
    }

    #[inline]
    fn slot(&self, offset: usize) -> usize {
        (self.start + offset) & self.table.mask
    }

    /// Offset of the next occupied slot at or after `next_offset`.
    fn seek(&self) -> Option<usize> {
        (self.next_offset..self.table.capacity())
            .find(|&offset| self.table.buckets[self.slot(offset)].is_some())
    }

    /// Returns `true` if a call to [`next`](Self::next) would return an
    /// element.
    pub fn has_next(&self) -> bool {
        self.seek().is_some()
    }

    /// Advances to the next element and returns a mutable reference to it.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&mut V> {
        let Some(offset) = self.seek() else {
            self.next_offset = self.table.capacity();
            self.current = None;
            return None;
        };

        let index = self.slot(offset);
        self.next_offset = offset + 1;
        self.current = Some(index);
        Some(self.table.value_mut(index))
    }

    /// Removes the element last returned by [`next`](Self::next).
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoCurrentElement`] if `next` has not been called, if
    /// it returned `None`, or if its element was already removed.
    pub fn remove(&mut self) -> Result<V, Error> {
        let index = self.current.take().ok_or(Error::NoCurrentElement)?;
        let value = self.table.remove_slot(index);
        if self.table.buckets[index].is_some() {
            self.next_offset -= 1;
        }
        Ok(value)
    }

    /// Moves the cursor back before the first element.
    pub fn reset(&mut self) {
        self.next_offset = 0;
        self.current = None;
    }

    /// Returns the number of elements left in the table.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec;
    use core::hash::Hasher;

    use proptest::prelude::*;
    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;

    struct HashState {
        k0: u64,
        k1: u64,
    }

    impl HashState {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k0: rng.try_next_u64().unwrap(),
                k1: rng.try_next_u64().unwrap(),
            }
        }

        fn build_hasher(&self) -> SipHasher {
            SipHasher::new_with_keys(self.k0, self.k1)
        }
    }

    #[derive(Debug, PartialEq, Eq, Clone)]
    struct Item {
        key: u64,
        value: i32,
    }

    fn hash_key(state: &HashState, key: u64) -> u64 {
        let mut h = state.build_hasher();
        h.write_u64(key);
        h.finish()
    }

    fn insert_item(table: &mut HashTable<Item>, state: &HashState, key: u64, value: i32) {
        let hash = hash_key(state, key);
        match table.entry(hash, |v: &Item| v.key == key) {
            Entry::Vacant(v) => {
                v.insert(Item { key, value });
            }
            Entry::Occupied(_) => panic!("unexpected occupied entry for {key}: {table:#?}"),
        }
    }

    #[test]
    fn insert_and_find() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::with_capacity(0);
        for k in 0..32u64 {
            insert_item(&mut table, &state, k, (k as i32) * 2);
            assert_eq!(
                table.find(hash_key(&state, k), |v| v.key == k),
                Some(&Item {
                    key: k,
                    value: (k as i32) * 2
                }),
                "{:#?}",
                table
            );
        }
        assert_eq!(table.len(), 32);
        for k in 0..32u64 {
            let hash = hash_key(&state, k);
            assert_eq!(table.find(hash, |v| v.key == k).map(|v| v.value), Some(k as i32 * 2));
        }

        let miss_hash = hash_key(&state, 999);
        assert!(table.find(miss_hash, |v| v.key == 999).is_none());
        table.assert_probe_invariant();
    }

    #[test]
    fn duplicate_entry_is_occupied() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::with_capacity(0);
        let k = 42u64;
        let hash = hash_key(&state, k);
        insert_item(&mut table, &state, k, 7);

        match table.entry(hash, |v| v.key == k) {
            Entry::Occupied(mut occ) => {
                let prev = occ.replace(Item { key: k, value: 11 });
                assert_eq!(prev.value, 7);
            }
            Entry::Vacant(_) => panic!("should be occupied: {}#{:02X} in {:#?}", k, hash, table),
        }
        assert_eq!(table.find(hash, |v| v.key == k).unwrap().value, 11);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn find_mut_and_modify() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::with_capacity(0);
        for k in 0..5u64 {
            insert_item(&mut table, &state, k, 1);
        }

        for k in 0..5u64 {
            if let Some(v) = table.find_mut(hash_key(&state, k), |v| v.key == k) {
                v.value += 9;
            }
        }
        for k in 0..5u64 {
            let v = table.find(hash_key(&state, k), |v| v.key == k).unwrap();
            assert_eq!(v.value, 10);
        }
    }

    #[test]
    fn remove_items() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::with_capacity(0);
        for k in 0..8u64 {
            insert_item(&mut table, &state, k, k as i32);
        }
        assert_eq!(table.len(), 8);
        for k in [0u64, 3, 7] {
            let hash = hash_key(&state, k);
            let removed = table.remove(hash, |v| v.key == k).expect("should remove");
            assert_eq!(removed.key, k);
            assert!(table.remove(hash, |v| v.key == k).is_none());
        }
        assert_eq!(table.len(), 5);
        table.assert_probe_invariant();

        let hash = hash_key(&state, 1000);
        assert!(table.remove(hash, |v| v.key == 1000).is_none());
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn insert_many() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::with_capacity(0);
        for k in 0..100000u64 {
            insert_item(&mut table, &state, k, k as i32);
        }

        assert_eq!(table.len(), 100000);
        for k in 0..100000u64 {
            let hash = hash_key(&state, k);
            assert_eq!(
                table.find(hash, |v| v.key == k),
                Some(&Item {
                    key: k,
                    value: k as i32
                })
            );
        }
        table.assert_probe_invariant();
    }

    #[test]
    fn explicit_collision() {
        let mut table: HashTable<Item> = HashTable::with_capacity(0);
        let hash = 0;
        for k in 0..65u64 {
            match table.entry(hash, |v| v.key == k) {
                Entry::Vacant(v) => {
                    v.insert(Item {
                        key: k,
                        value: k as i32,
                    });
                }
                _ => unreachable!(),
            }
        }

        assert_eq!(table.len(), 65);
        for k in 0..65u64 {
            assert_eq!(table.find(hash, |v| v.key == k).map(|v| v.value), Some(k as i32));
        }
        for k in (0..65u64).step_by(3) {
            assert!(table.remove(hash, |v| v.key == k).is_some());
        }
        for k in 0..65u64 {
            assert_eq!(table.find(hash, |v| v.key == k).is_some(), k % 3 != 0);
        }
        table.assert_probe_invariant();
    }

    #[test]
    fn backward_shift_keeps_run_reachable() {
        // Every element shares home slot 0, so each removal must pull the
        // rest of the run back by one.
        let mut table: HashTable<u64> = HashTable::with_capacity(8);
        for k in 0..6u64 {
            table.entry(0, |&v| v == k).or_insert(k);
        }
        assert_eq!(table.probe_histogram(), vec![1, 1, 1, 1, 1, 1]);

        assert_eq!(table.remove(0, |&v| v == 2), Some(2));
        assert_eq!(table.probe_histogram(), vec![1, 1, 1, 1, 1]);
        for k in [0u64, 1, 3, 4, 5] {
            assert_eq!(table.find(0, |&v| v == k), Some(&k));
        }
        table.assert_probe_invariant();
    }

    #[test]
    fn resize_on_threshold() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::with_capacity(0);
        let capacity = table.capacity();
        let threshold = table.threshold();
        let multiplier = table.hash_multiplier();

        for k in 0..(threshold as u64 - 1) {
            insert_item(&mut table, &state, k, k as i32);
        }
        assert_eq!(table.capacity(), capacity);
        assert_eq!(table.hash_multiplier(), multiplier);

        insert_item(&mut table, &state, 1000, 1000);
        assert!(table.capacity() > capacity);
        assert_ne!(table.hash_multiplier(), multiplier);
        assert_eq!(table.hash_multiplier() & 1, 1);

        for k in 0..(threshold as u64 - 1) {
            assert_eq!(
                table.find(hash_key(&state, k), |v| v.key == k).map(|v| v.value),
                Some(k as i32)
            );
        }
        assert_eq!(
            table.find(hash_key(&state, 1000), |v| v.key == 1000).map(|v| v.value),
            Some(1000)
        );
        table.assert_probe_invariant();
    }

    #[test]
    fn vacant_insert_returns_moved_value() {
        let mut table: HashTable<u64> = HashTable::with_capacity(0);
        for k in 0..200u64 {
            let value = table.entry(k, |&v| v == k).or_insert(k);
            *value += 1000;
        }
        for k in 0..200u64 {
            assert_eq!(table.find(k, |&v| v == k + 1000), Some(&(k + 1000)));
        }
    }

    #[test]
    fn load_factor_one_keeps_an_empty_slot() {
        let mut table: HashTable<u32> = HashTable::with_capacity_and_load_factor(0, 1.0).unwrap();
        for k in 0..100u32 {
            table.entry(k as u64, |&v| v == k).or_insert(k);
            assert!(table.len() < table.capacity());
        }
        table.assert_probe_invariant();
    }

    #[test]
    fn invalid_load_factor_is_rejected() {
        for lf in [0.0f32, -1.0, 1.5, f32::NAN, 1e-30, f32::MIN_POSITIVE] {
            assert!(HashTable::<u32>::with_capacity_and_load_factor(4, lf).is_err());
        }
    }

    #[test]
    fn smallest_load_factor_still_grows() {
        let mut table: HashTable<u64> =
            HashTable::with_capacity_and_load_factor(0, sizing::MIN_LOAD_FACTOR).unwrap();
        for k in 0..8u64 {
            table.entry(k, |&v| v == k).or_insert(k);
        }
        assert_eq!(table.len(), 8);
        assert!(table.threshold() > 8);
        table.assert_probe_invariant();
    }

    #[test]
    fn iter_and_drain() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::with_capacity(0);
        for k in 10..20u64 {
            insert_item(&mut table, &state, k, (k as i32) + 1);
        }
        let collected: Vec<u64> = table.iter().map(|v| v.key).collect();
        assert_eq!(collected.len(), 10, "{:#?}", table);
        assert_eq!(table.iter().len(), 10);
        for k in 10..20u64 {
            assert!(collected.contains(&k));
        }

        for item in table.iter_mut() {
            item.value = -1;
        }
        assert!(table.iter().all(|item| item.value == -1));

        let capacity = table.capacity();
        let drained: Vec<Item> = table.drain().collect();
        assert_eq!(drained.len(), 10);
        assert_eq!(table.len(), 0);
        assert_eq!(table.capacity(), capacity);

        for k in 10..20u64 {
            assert!(table.find(hash_key(&state, k), |v| v.key == k).is_none());
        }
    }

    #[test]
    fn partially_consumed_drain_empties_table() {
        let mut table: HashTable<String> = HashTable::new();
        for k in 0..10u64 {
            table.entry(k, |_| false).or_insert(k.to_string());
        }
        let mut drain = table.drain();
        assert!(drain.next().is_some());
        drop(drain);
        assert!(table.is_empty());
        assert!(table.iter().next().is_none());
    }

    #[test]
    fn into_iter_yields_everything() {
        let mut table: HashTable<u64> = HashTable::new();
        for k in 0..50u64 {
            table.entry(k, |&v| v == k).or_insert(k);
        }
        let mut values: Vec<u64> = table.into_iter().collect();
        values.sort();
        assert_eq!(values, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn cursor_visits_each_element_once() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::with_capacity(0);
        for k in 0..500u64 {
            insert_item(&mut table, &state, k, k as i32);
        }

        let mut seen = vec![0u32; 500];
        let mut cursor = table.cursor_mut();
        while let Some(item) = cursor.next() {
            seen[item.key as usize] += 1;
            if item.key % 2 == 0 {
                cursor.remove().unwrap();
            }
        }
        assert!(seen.iter().all(|&count| count == 1));
        assert_eq!(table.len(), 250);
        assert!(table.iter().all(|item| item.key % 2 == 1));
        table.assert_probe_invariant();
    }

    #[test]
    fn cursor_with_full_collision_run() {
        // One probe run covering all but two slots.
        let mut table: HashTable<u64> = HashTable::with_capacity_and_load_factor(0, 1.0).unwrap();
        table.reserve(14);
        let capacity = table.capacity();
        for k in 0..(capacity as u64 - 2) {
            table.entry(u64::MAX, |&v| v == k).or_insert(k);
        }

        let mut seen = Vec::new();
        let mut cursor = table.cursor_mut();
        while let Some(&mut v) = cursor.next() {
            seen.push(v);
            cursor.remove().unwrap();
        }
        seen.sort();
        assert_eq!(seen, (0..(capacity as u64 - 2)).collect::<Vec<_>>());
        assert!(table.is_empty());
    }

    #[test]
    fn cursor_state_errors() {
        let mut table: HashTable<u64> = HashTable::new();
        table.entry(1, |&v| v == 1).or_insert(1);

        let mut cursor = table.cursor_mut();
        assert!(cursor.has_next());
        assert_eq!(cursor.remove(), Err(Error::NoCurrentElement));
        assert_eq!(cursor.next().copied(), Some(1));
        assert!(!cursor.has_next());
        assert_eq!(cursor.remove(), Ok(1));
        assert_eq!(cursor.remove(), Err(Error::NoCurrentElement));
        assert!(cursor.next().is_none());
        assert_eq!(cursor.remove(), Err(Error::NoCurrentElement));
        assert!(cursor.is_empty());
    }

    #[test]
    fn cursor_reset_restarts() {
        let mut table: HashTable<u64> = HashTable::new();
        for k in 0..5u64 {
            table.entry(k, |&v| v == k).or_insert(k);
        }
        let mut cursor = table.cursor_mut();
        let mut first_pass = 0;
        while cursor.next().is_some() {
            first_pass += 1;
        }
        cursor.reset();
        let mut second_pass = 0;
        while cursor.next().is_some() {
            second_pass += 1;
        }
        assert_eq!(first_pass, 5);
        assert_eq!(second_pass, 5);
    }

    #[test]
    fn retain_keeps_matching() {
        let mut table: HashTable<u64> = HashTable::new();
        for k in 0..100u64 {
            table.entry(k, |&v| v == k).or_insert(k);
        }
        table.retain(|v| *v % 10 == 0);
        assert_eq!(table.len(), 10);
        for k in 0..100u64 {
            assert_eq!(table.find(k, |&v| v == k).is_some(), k % 10 == 0);
        }
        table.assert_probe_invariant();
    }

    #[derive(Debug, PartialEq, Eq, Clone)]
    struct StringItem {
        key: String,
        value: i32,
    }

    fn hash_string_key(state: &HashState, key: &str) -> u64 {
        let mut h = state.build_hasher();
        h.write(key.as_bytes());
        h.finish()
    }

    #[test]
    fn insert_and_remove_string_keys() {
        let state = HashState::default();
        let mut table: HashTable<StringItem> = HashTable::new();
        let keys = ["apple", "banana", "cherry", "date", "elderberry"];
        for (i, key) in keys.iter().enumerate() {
            let hash = hash_string_key(&state, key);
            table
                .entry(hash, |item| item.key == *key)
                .or_insert_with(|| StringItem {
                    key: key.to_string(),
                    value: i as i32,
                });
        }
        assert_eq!(table.len(), keys.len());

        let hash = hash_string_key(&state, "banana");
        let removed = table.remove(hash, |item| item.key == "banana");
        assert_eq!(removed.map(|item| item.value), Some(1));
        assert!(table.find(hash, |item| item.key == "banana").is_none());

        let hash = hash_string_key(&state, "cherry");
        table.entry(hash, |item| item.key == "cherry").and_modify(|item| item.value = 99);
        assert_eq!(table.find(hash, |item| item.key == "cherry").unwrap().value, 99);
    }

    #[test]
    fn test_clone() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..40u64 {
            insert_item(&mut table, &state, k, k as i32);
        }
        let cloned = table.clone();
        table.clear();
        assert!(table.is_empty());
        assert_eq!(cloned.len(), 40);
        for k in 0..40u64 {
            assert!(cloned.find(hash_key(&state, k), |v| v.key == k).is_some());
        }
    }

    #[test]
    fn test_shrink_to_fit_after_removals() {
        let mut table: HashTable<u64> = HashTable::new();
        for k in 0..1000u64 {
            table.entry(k, |&v| v == k).or_insert(k);
        }
        let big = table.capacity();
        for k in 10..1000u64 {
            table.remove(k, |&v| v == k);
        }
        table.shrink_to_fit();
        assert!(table.capacity() < big);
        for k in 0..10u64 {
            assert_eq!(table.find(k, |&v| v == k), Some(&k));
        }
        table.assert_probe_invariant();

        table.clear();
        table.shrink_to_fit();
        assert_eq!(table.capacity(), sizing::MIN_CAPACITY);
    }

    #[test]
    fn debug_stats_reflect_table() {
        let mut table: HashTable<u64> = HashTable::new();
        for k in 0..100u64 {
            table.entry(k, |&v| v == k).or_insert(k);
        }
        let stats = table.debug_stats();
        assert_eq!(stats.len, 100);
        assert_eq!(stats.capacity, table.capacity());
        assert_eq!(stats.threshold, table.threshold());
        assert_eq!(stats.hash_multiplier, table.hash_multiplier());
        assert_eq!(table.probe_histogram().iter().sum::<usize>(), 100);
        assert!(stats.mean_probe_length <= stats.max_probe_length as f64);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(u8),
        Remove(u8),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => any::<u8>().prop_map(Op::Insert),
            2 => any::<u8>().prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn prop_probe_invariant_holds(
            ops in proptest::collection::vec(op_strategy(), 1..400),
            lf in 0.1f32..=1.0f32,
        ) {
            // Small hashes with many collisions stress the backward shift.
            let hash = |k: u8| (k % 16) as u64;
            let mut table: HashTable<u8> = HashTable::with_capacity_and_load_factor(0, lf).unwrap();
            let mut model = alloc::collections::BTreeSet::new();

            for op in ops {
                match op {
                    Op::Insert(k) => {
                        table.entry(hash(k), |&v| v == k).or_insert(k);
                        model.insert(k);
                    }
                    Op::Remove(k) => {
                        let removed = table.remove(hash(k), |&v| v == k);
                        prop_assert_eq!(removed.is_some(), model.remove(&k));
                    }
                }
                table.assert_probe_invariant();
                prop_assert_eq!(table.len(), model.len());
            }

            for k in 0..=u8::MAX {
                prop_assert_eq!(table.find(hash(k), |&v| v == k).is_some(), model.contains(&k));
            }
        }
    }
}
