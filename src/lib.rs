#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod aliases;

/// The error type returned by fallible constructors, index-based mutators and
/// cursors.
pub mod error;

/// An unordered map built on [`HashTable`].
///
/// This module provides a `HashMap` that wraps the `HashTable` with a hasher
/// builder and a standard key-value interface.
pub mod hash_map;

/// An unordered set built on [`HashTable`].
///
/// This module provides a `HashSet` that wraps the `HashTable` with a hasher
/// builder and the usual set algebra.
pub mod hash_set;

/// The open-addressing table every collection is built on.
pub mod hash_table;

pub mod hasher;

pub mod holder_set;

pub mod order;

pub mod ordered_map;

pub mod ordered_set;

pub mod sizing;

pub use aliases::*;
pub use error::Error;
pub use hash_map::Entry;
pub use hash_map::HashMap;
pub use hash_set::HashSet;
pub use hash_table::HashTable;
pub use hasher::DefaultHashBuilder;
pub use holder_set::HolderSet;
pub use order::BagOrder;
pub use order::ListOrder;
pub use order::OrderStrategy;
pub use ordered_map::OrderedMap;
pub use ordered_set::OrderedSet;
pub use sizing::LoadFactor;
