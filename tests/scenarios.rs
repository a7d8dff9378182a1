// End-to-end usage scenarios through the public API.
//
// Each test walks one short sequence of calls and checks the observable
// state after every step that matters.
use linprobe::Error;
use linprobe::HashMap;
use linprobe::HashSet;
use linprobe::IntSet;
use linprobe::OrderedMap;
use linprobe::hash_table::HashTable;

// Overwriting a key keeps the length and replaces the value.
#[test]
fn overwrite_keeps_len() {
    let mut map: HashMap<&str, i32> = HashMap::new();
    assert_eq!(map.insert("a", 1), None);
    assert_eq!(map.insert("b", 2), None);
    assert_eq!(map.insert("a", 3), Some(1));
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("a"), Some(&3));
    assert_eq!(map.get("b"), Some(&2));
}

// Removing by index from an ordered map shifts later keys down and drops the
// key from the table.
#[test]
fn ordered_remove_at() {
    let mut map: OrderedMap<&str, i32> = OrderedMap::new();
    map.insert("a", 1);
    map.insert("b", 2);
    map.insert("c", 3);
    assert_eq!(map.remove_at(1), Ok(("b", 2)));
    assert_eq!(map.order(), ["a", "c"]);
    assert_eq!(map.get("b"), None);
    assert_eq!(map.iter().map(|(k, _)| *k).collect::<Vec<_>>(), ["a", "c"]);
}

// Zero is an ordinary key.
#[test]
fn int_set_zero_round_trip() {
    let mut set = IntSet::new();
    assert!(set.insert(0));
    assert!(set.contains(&0));
    assert!(set.remove(&0));
    assert!(!set.contains(&0));
    assert!(set.insert(0));
    assert_eq!(set.len(), 1);
}

// A cursor refuses to remove before it has returned anything, and refuses a
// second removal of the same element.
#[test]
fn cursor_remove_requires_next() {
    let mut set: HashSet<u32> = (0..4).collect();
    let mut cursor = set.cursor_mut();
    assert_eq!(cursor.remove(), Err(Error::NoCurrentElement));
    assert!(cursor.next().is_some());
    assert!(cursor.remove().is_ok());
    assert_eq!(cursor.remove(), Err(Error::NoCurrentElement));
}

// Removing every other element through a cursor visits each element once.
#[test]
fn cursor_visits_each_element_once() {
    let mut map: HashMap<u32, u32> = (0..1000).map(|k| (k, 0)).collect();
    let mut remove = false;

    let mut cursor = map.cursor_mut();
    while let Some((_, visits)) = cursor.next() {
        *visits += 1;
        if remove {
            cursor.remove().unwrap();
        }
        remove = !remove;
    }

    assert_eq!(map.len(), 500);
    assert!(map.values().all(|&visits| visits == 1));
}

// The table grows exactly when its length reaches the threshold, keeps every
// element, and picks a new multiplier.
#[test]
fn growth_at_threshold() {
    let mut table: HashTable<u64> = HashTable::with_capacity(100);
    let threshold = table.threshold();
    let capacity = table.capacity();
    let multiplier = table.hash_multiplier();

    for value in 0..threshold as u64 - 1 {
        table.entry(value, |&v| v == value).or_insert(value);
    }
    assert_eq!(table.capacity(), capacity);

    let last = threshold as u64 - 1;
    table.entry(last, |&v| v == last).or_insert(last);
    assert!(table.capacity() > capacity);
    assert_ne!(table.hash_multiplier(), multiplier);
    assert!(table.len() < table.threshold());

    for value in 0..threshold as u64 {
        assert_eq!(table.find(value, |&v| v == value), Some(&value));
    }
}

// Invalid load factors are rejected before anything is allocated.
#[test]
fn invalid_load_factor() {
    for lf in [0.0, -0.5, 1.5, f32::NAN, 1e-30] {
        assert!(matches!(
            HashMap::<u8, u8>::with_capacity_and_load_factor(8, lf),
            Err(Error::InvalidLoadFactor(_))
        ));
    }
    assert!(HashMap::<u8, u8>::with_capacity_and_load_factor(8, 1.0).is_ok());
}
