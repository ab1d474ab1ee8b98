#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type HeightMap<K> = HashMap<K, u32>;
#[cfg(not(feature = "std"))]
pub(crate) type HeightMap<K> = BTreeMap<K, u32>;

/// Identity of a page.
///
/// Used for de-duplication inside a window and as the key of the measured height map, so it must
/// stay stable across re-renders.
#[cfg(feature = "std")]
pub trait PageKey: core::hash::Hash + Eq + Clone + core::fmt::Debug {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq + Clone + core::fmt::Debug> PageKey for K {}

#[cfg(not(feature = "std"))]
pub trait PageKey: Ord + Clone + core::fmt::Debug {}
#[cfg(not(feature = "std"))]
impl<K: Ord + Clone + core::fmt::Debug> PageKey for K {}
