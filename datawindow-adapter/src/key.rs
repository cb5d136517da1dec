#[cfg(not(feature = "std"))]
use alloc::collections::{BTreeMap, BTreeSet};
#[cfg(feature = "std")]
use std::collections::{HashMap, HashSet};

#[cfg(feature = "std")]
pub(crate) type IdMap<K, V> = HashMap<K, V>;
#[cfg(feature = "std")]
pub(crate) type IdSet<K> = HashSet<K>;
#[cfg(not(feature = "std"))]
pub(crate) type IdMap<K, V> = BTreeMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type IdSet<K> = BTreeSet<K>;

/// Bound for anchor ids: `Hash + Eq` with `std`, `Ord` without.
#[cfg(feature = "std")]
pub trait AnchorId: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<T: core::hash::Hash + Eq> AnchorId for T {}

#[cfg(not(feature = "std"))]
pub trait AnchorId: Ord {}
#[cfg(not(feature = "std"))]
impl<T: Ord> AnchorId for T {}
