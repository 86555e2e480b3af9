//! Hash map and set aliases used throughout Graphlab.
//!
//! Iteration order of these maps is unspecified. Anything that feeds a
//! tie-break must use insertion-ordered structures instead.

/// A `HashMap` using `ahash`.
pub type FxHashMap<K, V> = hashbrown::HashMap<K, V, ahash::RandomState>;

/// A `HashSet` using `ahash`.
pub type FxHashSet<T> = hashbrown::HashSet<T, ahash::RandomState>;
