// Property tests against the standard collections.
//
// Property 1: HashMap agrees with std::collections::HashMap.
//  - Operations: insert, remove, entry increment, cursor removal.
//  - Invariant: len() and get() match the model for every key in range.
//
// Property 2: IntSet agrees with std::collections::HashSet.
//  - Keys are drawn from a narrow range and multiplied so that identity
//    hashing produces clustered home slots.
//
// Property 3: insert n distinct keys, then remove them in any order.
//  - Invariant: each remove returns Some once and None after; the map ends
//    empty.
//
// Property 4: OrderedMap under ListOrder agrees with a Vec model.
//  - Operations: insert, insert_at, remove, remove_at, alter, alter_at.
//  - Invariant: order()[i] is the i-th key yielded by iter(), and both match
//    the model.
//
// Property 5: OrderedSet under BagOrder agrees with a swap_remove Vec model.
use std::collections::HashMap as StdHashMap;
use std::collections::HashSet as StdHashSet;

use linprobe::BagOrder;
use linprobe::DefaultHashBuilder;
use linprobe::HashMap;
use linprobe::IntSet;
use linprobe::ListOrder;
use linprobe::OrderedMap;
use linprobe::OrderedSet;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_map_matches_std(ops in proptest::collection::vec((0u8..=3u8, 0u16..64u16, any::<i32>()), 1..400)) {
        let mut map: HashMap<u16, i32> = HashMap::new();
        let mut model: StdHashMap<u16, i32> = StdHashMap::new();

        for (op, key, value) in ops {
            match op {
                0 => {
                    prop_assert_eq!(map.insert(key, value), model.insert(key, value));
                }
                1 => {
                    prop_assert_eq!(map.remove(&key), model.remove(&key));
                }
                2 => {
                    let v = map.entry(key).or_insert(0);
                    *v = v.wrapping_add(1);
                    let m = model.entry(key).or_insert(0);
                    *m = m.wrapping_add(1);
                }
                3 => {
                    // Remove every key that shares the low bits of `key`.
                    let mut cursor = map.cursor_mut();
                    while let Some((k, _)) = cursor.next() {
                        if k % 8 == key % 8 {
                            cursor.remove().unwrap();
                        }
                    }
                    model.retain(|k, _| k % 8 != key % 8);
                }
                _ => unreachable!(),
            }
            prop_assert_eq!(map.len(), model.len());
        }

        for key in 0u16..64 {
            prop_assert_eq!(map.get(&key), model.get(&key));
        }
        prop_assert_eq!(map.iter().count(), model.len());
    }

    #[test]
    fn prop_int_set_matches_std(ops in proptest::collection::vec((any::<bool>(), 0i32..200), 1..500)) {
        let mut set = IntSet::new();
        let mut model: StdHashSet<i32> = StdHashSet::new();

        for (insert, raw) in ops {
            let key = raw * 1024;
            if insert {
                prop_assert_eq!(set.insert(key), model.insert(key));
            } else {
                prop_assert_eq!(set.remove(&key), model.remove(&key));
            }
            prop_assert_eq!(set.len(), model.len());
        }

        for raw in 0..200 {
            let key = raw * 1024;
            prop_assert_eq!(set.contains(&key), model.contains(&key));
        }
    }

    #[test]
    fn prop_insert_then_remove_all(keys in Just((0u64..300).collect::<Vec<_>>()).prop_shuffle()) {
        let mut map: HashMap<u64, u64> = (0..300).map(|k| (k, k * k)).collect();
        prop_assert_eq!(map.len(), 300);

        for key in keys {
            prop_assert_eq!(map.remove(&key), Some(key * key));
            prop_assert_eq!(map.remove(&key), None);
        }
        prop_assert!(map.is_empty());
        prop_assert_eq!(map.iter().next(), None);
    }

    #[test]
    fn prop_ordered_map_matches_vec(ops in proptest::collection::vec((0u8..=5u8, 0u8..32u8, 0usize..40usize), 1..200)) {
        let mut map: OrderedMap<u8, usize, DefaultHashBuilder, ListOrder> = OrderedMap::new();
        let mut model: Vec<(u8, usize)> = Vec::new();

        for (op, key, n) in ops {
            let found = model.iter().position(|(k, _)| *k == key);
            match op {
                0 => {
                    let old = map.insert(key, n);
                    match found {
                        Some(i) => prop_assert_eq!(old, Some(std::mem::replace(&mut model[i].1, n))),
                        None => {
                            prop_assert_eq!(old, None);
                            model.push((key, n));
                        }
                    }
                }
                1 => {
                    let result = map.insert_at(n, key, n);
                    match found {
                        Some(i) if n < model.len() => {
                            let (k, v) = model.remove(i);
                            prop_assert_eq!(result, Ok(Some(v)));
                            model.insert(n, (k, n));
                        }
                        None if n <= model.len() => {
                            prop_assert_eq!(result, Ok(None));
                            model.insert(n, (key, n));
                        }
                        _ => prop_assert!(result.is_err()),
                    }
                }
                2 => {
                    prop_assert_eq!(map.remove(&key), found.map(|i| model.remove(i).1));
                }
                3 => {
                    let result = map.remove_at(n);
                    if n < model.len() {
                        prop_assert_eq!(result, Ok(model.remove(n)));
                    } else {
                        prop_assert!(result.is_err());
                    }
                }
                4 => {
                    let after = key.wrapping_add(n as u8) % 32;
                    let taken = model.iter().any(|(k, _)| *k == after);
                    let changed = map.alter(&key, after);
                    prop_assert_eq!(changed, found.is_some() && !taken);
                    if changed {
                        if let Some(i) = found {
                            model[i].0 = after;
                        }
                    }
                }
                5 => {
                    let taken = model.iter().any(|(k, _)| *k == key);
                    let result = map.alter_at(n, key);
                    if n >= model.len() {
                        prop_assert!(result.is_err());
                    } else {
                        prop_assert_eq!(result, Ok(!taken));
                        if !taken {
                            model[n].0 = key;
                        }
                    }
                }
                _ => unreachable!(),
            }

            let keys: Vec<u8> = model.iter().map(|(k, _)| *k).collect();
            prop_assert_eq!(map.order(), keys.as_slice());
            let visited: Vec<(u8, usize)> = map.iter().map(|(k, v)| (*k, *v)).collect();
            prop_assert_eq!(&visited, &model);
        }
    }

    #[test]
    fn prop_bag_set_matches_swap_remove(ops in proptest::collection::vec((0u8..=2u8, 0u32..50u32), 1..200)) {
        let mut set: OrderedSet<u32, DefaultHashBuilder, BagOrder> = OrderedSet::new();
        let mut model: Vec<u32> = Vec::new();

        for (op, value) in ops {
            match op {
                0 => {
                    let added = set.insert(value);
                    prop_assert_eq!(added, !model.contains(&value));
                    if added {
                        model.push(value);
                    }
                }
                1 => {
                    let removed = set.remove(&value);
                    match model.iter().position(|v| *v == value) {
                        Some(i) => {
                            prop_assert!(removed);
                            model.swap_remove(i);
                        }
                        None => prop_assert!(!removed),
                    }
                }
                2 => {
                    let index = value as usize;
                    let result = set.remove_at(index);
                    if index < model.len() {
                        prop_assert_eq!(result, Ok(model.swap_remove(index)));
                    } else {
                        prop_assert!(result.is_err());
                    }
                }
                _ => unreachable!(),
            }
            prop_assert_eq!(set.order(), model.as_slice());
        }
    }
}
