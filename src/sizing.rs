//! Load factor validation and the growth policy shared by every table.
//!
//! All tables use the same rules: capacities are powers of two no smaller
//! than [`MIN_CAPACITY`], the resize threshold is `floor(capacity *
//! load_factor)` clamped to `[1, capacity - 1]`, and a table grows as soon as
//! its length reaches the threshold. The clamp keeps at least one slot empty,
//! which linear probing relies on to terminate.

use crate::error::Error;

/// The smallest number of slots a table ever allocates.
pub const MIN_CAPACITY: usize = 2;

/// The smallest accepted load factor.
///
/// Below it the threshold stays at 1 until the capacity is too large to
/// allocate, so growth would overflow instead of making room.
pub const MIN_LOAD_FACTOR: f32 = 1.0 / 1024.0;

/// Multiplier every table starts from. Odd, so multiplication by it is a
/// bijection on `u64`.
pub(crate) const INITIAL_MULTIPLIER: u64 = 0xD1B5_4A32_D192_ED03;

/// Odd constant folded into the multiplier on each resize.
const RESIZE_MULTIPLIER: u64 = 0xF135_7AEA_2E62_A9C5;

/// The fraction of a table's slots that may be occupied before it grows.
///
/// Always in `[MIN_LOAD_FACTOR, 1]`. Lower values trade memory for shorter
/// probe runs.
///
/// # Examples
///
/// ```rust
/// use linprobe::Error;
/// use linprobe::LoadFactor;
///
/// assert_eq!(LoadFactor::new(0.5).map(LoadFactor::get), Ok(0.5));
/// assert_eq!(LoadFactor::new(0.0), Err(Error::InvalidLoadFactor(0.0)));
/// assert_eq!(LoadFactor::default(), LoadFactor::DEFAULT);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct LoadFactor(f32);

impl LoadFactor {
    /// The load factor used by constructors that do not take one.
    pub const DEFAULT: LoadFactor = LoadFactor(0.7);

    /// Validates `value`, rejecting NaN and anything outside
    /// `[MIN_LOAD_FACTOR, 1]`.
    pub fn new(value: f32) -> Result<Self, Error> {
        if (MIN_LOAD_FACTOR..=1.0).contains(&value) {
            Ok(LoadFactor(value))
        } else {
            Err(Error::InvalidLoadFactor(value))
        }
    }

    /// Returns the load factor as a plain `f32`.
    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for LoadFactor {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f32> for LoadFactor {
    type Error = Error;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        LoadFactor::new(value)
    }
}

/// Number of entries a table of `capacity` slots holds before it grows.
#[inline]
pub(crate) fn threshold(capacity: usize, load_factor: LoadFactor) -> usize {
    debug_assert!(capacity.is_power_of_two() && capacity >= MIN_CAPACITY);
    let raw = (capacity as f64 * load_factor.0 as f64) as usize;
    raw.clamp(1, capacity - 1)
}

/// Smallest valid capacity that holds `entries` entries without growing.
pub(crate) fn capacity_for(entries: usize, load_factor: LoadFactor) -> usize {
    let mut capacity = entries
        .max(MIN_CAPACITY)
        .checked_next_power_of_two()
        .expect("capacity overflow");
    while threshold(capacity, load_factor) <= entries {
        capacity = capacity.checked_mul(2).expect("capacity overflow");
    }
    capacity
}

/// Capacity to grow to once a table of `capacity` slots reaches its
/// threshold with `len` entries.
#[inline]
pub(crate) fn grown_capacity(capacity: usize, len: usize, load_factor: LoadFactor) -> usize {
    capacity
        .checked_mul(2)
        .expect("capacity overflow")
        .max(capacity_for(len, load_factor))
}

/// Shift that keeps the top `log2(mask + 1)` bits of a mixed hash.
#[inline]
pub(crate) fn shift_for(mask: usize) -> u32 {
    (mask as u64).leading_zeros()
}

/// Derives the multiplier for a table that is being resized while holding
/// `len` entries.
///
/// Mixing in the length keeps two same-sized resizes of different tables
/// from landing on the same multiplier. `RESIZE_MULTIPLIER ^ 2 * len` is odd,
/// so an odd multiplier stays odd.
#[inline]
pub(crate) fn next_multiplier(multiplier: u64, len: usize) -> u64 {
    multiplier.wrapping_mul(RESIZE_MULTIPLIER ^ (len as u64).wrapping_mul(2))
}
