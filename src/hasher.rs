//! Hasher builders used by the collections.
//!
//! [`DefaultHashBuilder`] is what the generic collections use when no hasher
//! is named. [`PrimitiveState`] backs the primitive- and enum-keyed aliases:
//! it passes small integer keys through unchanged and leaves the mixing to
//! the table's multiplicative hash.

use core::hash::BuildHasher;
use core::hash::Hasher;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The default hasher builder: foldhash's fast, randomly seeded state.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The default hasher builder: the standard library's SipHash state.
        pub type DefaultHashBuilder = std::hash::RandomState;
    } else {
        /// The default hasher builder. Without `foldhash` or `std` this falls
        /// back to [`PrimitiveState`], which is not collision resistant.
        pub type DefaultHashBuilder = PrimitiveState;
    }
}

/// Odd constant used to fold byte streams and multi-word keys.
const FOLD: u64 = 0x9E37_79B9_7F4A_7C15;

/// Builds [`PrimitiveHasher`]s.
///
/// A single integer, `char`, `bool`, or fieldless enum discriminant hashes to
/// its own value (sign-extended for signed types). The table then multiplies
/// the hash by its per-instance multiplier and keeps the top bits, which is
/// enough to spread sequential and clustered keys.
///
/// # Examples
///
/// ```rust
/// use core::hash::BuildHasher;
///
/// use linprobe::hasher::PrimitiveState;
///
/// assert_eq!(PrimitiveState.hash_one(42u32), 42);
/// assert_eq!(PrimitiveState.hash_one('a'), 'a' as u64);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrimitiveState;

impl BuildHasher for PrimitiveState {
    type Hasher = PrimitiveHasher;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        PrimitiveHasher::default()
    }
}

/// A pass-through hasher for primitive keys.
///
/// The first integer written becomes the hash as-is. Any further writes are
/// folded in, so composite keys still hash every field.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimitiveHasher {
    hash: u64,
}

impl PrimitiveHasher {
    #[inline]
    fn fold(&mut self, word: u64) {
        self.hash = self.hash.rotate_left(26).wrapping_mul(FOLD) ^ word;
    }
}

impl Hasher for PrimitiveHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for chunk in bytes.chunks(8) {
            let mut word = [0u8; 8];
            word[..chunk.len()].copy_from_slice(chunk);
            self.fold(u64::from_le_bytes(word));
        }
    }

    #[inline]
    fn write_u8(&mut self, i: u8) {
        self.fold(i as u64);
    }

    #[inline]
    fn write_u16(&mut self, i: u16) {
        self.fold(i as u64);
    }

    #[inline]
    fn write_u32(&mut self, i: u32) {
        self.fold(i as u64);
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.fold(i);
    }

    #[inline]
    fn write_u128(&mut self, i: u128) {
        self.fold(i as u64);
        self.fold((i >> 64) as u64);
    }

    #[inline]
    fn write_usize(&mut self, i: usize) {
        self.fold(i as u64);
    }

    #[inline]
    fn write_i8(&mut self, i: i8) {
        self.fold(i as u64);
    }

    #[inline]
    fn write_i16(&mut self, i: i16) {
        self.fold(i as u64);
    }

    #[inline]
    fn write_i32(&mut self, i: i32) {
        self.fold(i as u64);
    }

    #[inline]
    fn write_i64(&mut self, i: i64) {
        self.fold(i as u64);
    }

    #[inline]
    fn write_i128(&mut self, i: i128) {
        self.write_u128(i as u128);
    }

    #[inline]
    fn write_isize(&mut self, i: isize) {
        self.fold(i as u64);
    }
}
