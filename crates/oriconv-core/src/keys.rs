//! Sensor identifiers, ordered key pairs, and keyed-map utilities.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Sensors are identified by arbitrary string values.
pub type SenKey = String;

/// Synthetic sensor key for a numeric index (used by simulations).
pub fn key_from(num: usize) -> SenKey {
    format!("Key_{num}")
}

/// Ordered pair of sensor keys naming a pairwise relationship.
///
/// The pair reads "`into` with respect to `from`"; derived ordering is
/// lexicographic on `(from, into)`. This workspace only ever stores
/// pairs with `from < into`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyPair {
    /// Key of the relationship domain.
    pub from: SenKey,
    /// Key of the relationship range.
    pub into: SenKey,
}

impl KeyPair {
    pub fn new(from: impl Into<SenKey>, into: impl Into<SenKey>) -> Self {
        Self {
            from: from.into(),
            into: into.into(),
        }
    }

    /// First key of the 2-wrt-1 notation (alias of `from`).
    pub fn key1(&self) -> &SenKey {
        &self.from
    }

    /// Second key of the 2-wrt-1 notation (alias of `into`).
    pub fn key2(&self) -> &SenKey {
        &self.into
    }
}

impl fmt::Display for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(Into): {}  Wrt(From): {}", self.into, self.from)
    }
}

/// Keys of a map, in map order.
pub fn keys_of<K: Ord + Clone, V>(map: &BTreeMap<K, V>) -> BTreeSet<K> {
    map.keys().cloned().collect()
}

/// Keys present in both maps.
pub fn common_keys<K: Ord + Clone, V1, V2>(
    map1: &BTreeMap<K, V1>,
    map2: &BTreeMap<K, V2>,
) -> BTreeSet<K> {
    map1.keys()
        .filter(|key| map2.contains_key(*key))
        .cloned()
        .collect()
}

/// True if both maps are keyed identically.
pub fn keys_match<K: Ord + Clone, V1, V2>(
    map1: &BTreeMap<K, V1>,
    map2: &BTreeMap<K, V2>,
) -> bool {
    map1.len() == map2.len() && map1.keys().zip(map2.keys()).all(|(ka, kb)| ka == kb)
}
