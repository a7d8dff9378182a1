//! Named specializations of the generic collections.
//!
//! Primitive- and enum-keyed aliases hash with [`PrimitiveState`], so a key
//! is its own hash before the table mixes it. Object-keyed aliases use
//! [`DefaultHashBuilder`]. Floating-point keys have no alias because `f32`
//! and `f64` are not `Eq`.
//!
//! ```rust
//! use linprobe::aliases::IntObjectOrderedMap;
//! use linprobe::aliases::IntSet;
//!
//! let mut ids: IntSet = IntSet::new();
//! assert!(ids.insert(0));
//! assert!(ids.contains(&0));
//!
//! let mut names: IntObjectOrderedMap<&str> = IntObjectOrderedMap::new();
//! names.insert(2, "two");
//! names.insert(1, "one");
//! assert_eq!(names.order(), [2, 1]);
//! ```

use crate::hash_map::HashMap;
use crate::hash_set::HashSet;
use crate::hasher::DefaultHashBuilder;
use crate::hasher::PrimitiveState;
use crate::order::BagOrder;
use crate::order::ListOrder;
use crate::ordered_map::OrderedMap;
use crate::ordered_set::OrderedSet;

/// A set of `i32`.
pub type IntSet = HashSet<i32, PrimitiveState>;
/// A set of `i64`.
pub type LongSet = HashSet<i64, PrimitiveState>;
/// A set of `i16`.
pub type ShortSet = HashSet<i16, PrimitiveState>;
/// A set of `i8`.
pub type ByteSet = HashSet<i8, PrimitiveState>;
/// A set of `char`.
pub type CharSet = HashSet<char, PrimitiveState>;

/// An insertion-ordered set of `i32`.
pub type IntOrderedSet = OrderedSet<i32, PrimitiveState, ListOrder>;
/// An insertion-ordered set of `i64`.
pub type LongOrderedSet = OrderedSet<i64, PrimitiveState, ListOrder>;
/// An indexable set of `i32` with `O(1)` removal.
pub type IntBagSet = OrderedSet<i32, PrimitiveState, BagOrder>;

/// A map from `i32` to any value.
pub type IntMap<V> = HashMap<i32, V, PrimitiveState>;
/// A map from `i64` to any value.
pub type LongMap<V> = HashMap<i64, V, PrimitiveState>;
/// A map from `char` to any value.
pub type CharMap<V> = HashMap<char, V, PrimitiveState>;
/// A map from `i32` to `i32`.
pub type IntIntMap = HashMap<i32, i32, PrimitiveState>;
/// A map from `i32` to `f32`.
pub type IntFloatMap = HashMap<i32, f32, PrimitiveState>;
/// A map from `i64` to `i64`.
pub type LongLongMap = HashMap<i64, i64, PrimitiveState>;
/// A map from `i64` to `f64`.
pub type LongDoubleMap = HashMap<i64, f64, PrimitiveState>;

/// An insertion-ordered map from `i32` to any value.
pub type IntObjectOrderedMap<V> = OrderedMap<i32, V, PrimitiveState, ListOrder>;
/// An insertion-ordered map from `i64` to any value.
pub type LongObjectOrderedMap<V> = OrderedMap<i64, V, PrimitiveState, ListOrder>;
/// An insertion-ordered map from `i32` to `i32`.
pub type IntIntOrderedMap = OrderedMap<i32, i32, PrimitiveState, ListOrder>;
/// An indexable map from `i32` to any value with `O(1)` removal.
pub type IntObjectBagMap<V> = OrderedMap<i32, V, PrimitiveState, BagOrder>;

/// A set of fieldless enum values, hashed by discriminant.
pub type EnumSet<E> = HashSet<E, PrimitiveState>;
/// A map keyed by fieldless enum values, hashed by discriminant.
pub type EnumMap<E, V> = HashMap<E, V, PrimitiveState>;
/// An insertion-ordered map keyed by fieldless enum values.
pub type EnumOrderedMap<E, V> = OrderedMap<E, V, PrimitiveState, ListOrder>;

/// An unordered map with object keys.
pub type ObjectMap<K, V> = HashMap<K, V, DefaultHashBuilder>;
/// An unordered set of objects.
pub type ObjectSet<T> = HashSet<T, DefaultHashBuilder>;
/// An insertion-ordered map with object keys.
pub type ObjectOrderedMap<K, V> = OrderedMap<K, V, DefaultHashBuilder, ListOrder>;
/// An insertion-ordered set of objects.
pub type ObjectOrderedSet<T> = OrderedSet<T, DefaultHashBuilder, ListOrder>;
/// An indexable map with object keys and `O(1)` removal.
pub type ObjectBagMap<K, V> = OrderedMap<K, V, DefaultHashBuilder, BagOrder>;
/// An indexable set of objects with `O(1)` removal.
pub type ObjectBagSet<T> = OrderedSet<T, DefaultHashBuilder, BagOrder>;

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Color {
        Red,
        Green,
        Blue,
    }

    #[test]
    fn int_set_zero_key() {
        let mut set = IntSet::new();
        assert!(set.insert(0));
        assert!(set.contains(&0));
        assert!(set.remove(&0));
        assert!(!set.contains(&0));
        assert!(set.insert(0));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn sequential_primitive_keys_spread() {
        let mut map = IntIntMap::new();
        for i in 0..10_000 {
            map.insert(i, i * 2);
        }
        assert_eq!(map.len(), 10_000);
        assert_eq!(map.get(&9_999), Some(&19_998));
        assert!(map.debug_stats().max_probe_length < 64);
    }

    #[test]
    fn negative_and_extreme_keys() {
        let mut set = LongSet::new();
        for key in [i64::MIN, -1, 0, 1, i64::MAX] {
            assert!(set.insert(key));
        }
        for key in [i64::MIN, -1, 0, 1, i64::MAX] {
            assert!(set.contains(&key));
        }
        let bytes: ByteSet = (i8::MIN..=i8::MAX).collect();
        assert_eq!(bytes.len(), 256);
        let shorts: ShortSet = [-3, 3].into_iter().collect();
        assert!(shorts.contains(&-3));
    }

    #[test]
    fn enum_keys() {
        let mut counts: EnumMap<Color, u32> = EnumMap::new();
        for c in [Color::Red, Color::Blue, Color::Red] {
            *counts.entry(c).or_insert(0) += 1;
        }
        assert_eq!(counts.get(&Color::Red), Some(&2));
        assert_eq!(counts.get(&Color::Green), None);

        let mut ordered: EnumOrderedMap<Color, &str> = EnumOrderedMap::new();
        ordered.insert(Color::Blue, "b");
        ordered.insert(Color::Red, "r");
        assert_eq!(ordered.order(), [Color::Blue, Color::Red]);

        let set: EnumSet<Color> = [Color::Green, Color::Green].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn bag_map_swaps_on_removal() {
        let mut bag: IntObjectBagMap<char> = IntObjectBagMap::new();
        for (i, c) in "abcd".chars().enumerate() {
            bag.insert(i as i32, c);
        }
        assert_eq!(bag.remove_at(0), Ok((0, 'a')));
        assert_eq!(bag.order(), [3, 1, 2]);
    }

    #[test]
    fn object_aliases() {
        let mut map: ObjectOrderedMap<&str, i32> = ObjectOrderedMap::new();
        map.insert("b", 2);
        map.insert("a", 1);
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["b", "a"]);

        let chars: CharSet = "hello".chars().collect();
        assert_eq!(chars.len(), 4);
    }
}
