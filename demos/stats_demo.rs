use std::hash::BuildHasher;

use clap::Parser;
use clap::ValueEnum;
use linprobe::HashSet;
use linprobe::IntSet;
use linprobe::hash_table::HashTable;
use linprobe::hasher::PrimitiveState;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Keys {
    /// 0, 1, 2, ...
    Sequential,
    /// Multiples of 1024, which share their low bits
    Strided,
    /// Uniformly random u32 values
    Random,
}

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "target_capacity", default_value_t = 1000)]
    target_capacity: usize,

    #[arg(short = 'l', long = "load_factor", default_value_t = 0.7)]
    load_factor: f32,

    #[arg(short = 'k', long = "keys", value_enum, default_value_t = Keys::Sequential)]
    keys: Keys,
}

fn key_stream(keys: Keys, count: usize) -> Vec<i32> {
    match keys {
        Keys::Sequential => (0..count as i32).collect(),
        Keys::Strided => (0..count as i32).map(|i| i.wrapping_mul(1024)).collect(),
        Keys::Random => {
            use rand::Rng;
            use rand::SeedableRng;
            use rand::rngs::SmallRng;

            let mut rng = SmallRng::seed_from_u64(0x5EED);
            let mut set: HashSet<i32> = HashSet::with_capacity(count);
            while set.len() < count {
                set.insert(rng.random());
            }
            set.into_iter().collect()
        }
    }
}

fn main() -> Result<(), linprobe::Error> {
    let args = Args::parse();

    println!(
        "Creating IntSet with target capacity {} and load factor {}",
        args.target_capacity, args.load_factor
    );

    let mut set = IntSet::with_capacity_and_load_factor(args.target_capacity, args.load_factor)?;
    let capacity = set.capacity();
    println!("Actual capacity: {}, grows at {}", capacity, set.threshold());

    let keys = key_stream(args.keys, set.threshold() - 1);
    println!("Filling set with {} {:?} keys...", keys.len(), args.keys);
    set.extend(keys.iter().copied());
    assert_eq!(set.capacity(), capacity);

    set.debug_stats().print();

    let hist = {
        let mut table = HashTable::with_capacity_and_load_factor(args.target_capacity, args.load_factor)?;
        for &key in &keys {
            let hash = PrimitiveState.hash_one(key);
            table.entry(hash, |&k: &i32| k == key).or_insert(key);
        }
        table.probe_histogram()
    };
    println!("Probe length histogram:");
    for (distance, count) in hist.iter().enumerate().filter(|(_, c)| **c > 0) {
        println!("  {distance:>4}: {count}");
    }

    let removed = keys.len() / 2;
    for key in keys.iter().take(removed) {
        set.remove(key);
    }
    println!("After removing {removed} keys:");
    set.debug_stats().print();

    Ok(())
}
