//! Pure projections over keyed mappings.
//!
//! Both operations borrow their inputs and return a new `BTreeMap`; the
//! source mapping is never mutated.

use std::collections::BTreeMap;

/// New mapping containing only the listed keys that exist in `map`.
///
/// Keys in `keys` that are absent from `map` are silently ignored.
///
/// # Example
/// ```
/// use pacer::pick;
/// use std::collections::BTreeMap;
///
/// let map = BTreeMap::from([("a", 1), ("b", 2), ("c", 3)]);
/// let picked = pick(&map, &["a", "c"]);
/// assert_eq!(picked, BTreeMap::from([("a", 1), ("c", 3)]));
/// ```
pub fn pick<K, V>(map: &BTreeMap<K, V>, keys: &[K]) -> BTreeMap<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    keys.iter()
        .filter_map(|k| map.get_key_value(k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// New mapping containing every key of `map` except the listed ones.
///
/// # Example
/// ```
/// use pacer::omit;
/// use std::collections::BTreeMap;
///
/// let map = BTreeMap::from([("a", 1), ("b", 2), ("c", 3)]);
/// let rest = omit(&map, &["a", "c"]);
/// assert_eq!(rest, BTreeMap::from([("b", 2)]));
/// ```
pub fn omit<K, V>(map: &BTreeMap<K, V>, keys: &[K]) -> BTreeMap<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    map.iter()
        .filter(|(k, _)| !keys.contains(k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
