//! Sensor orientations and pairwise relative orientations.

use std::collections::BTreeMap;

use crate::keys::{KeyPair, SenKey};
use crate::math::Transform;

/// Rigid orientation of one sensor with respect to some common frame.
pub type SenOri = Transform;

/// Relative orientations for every unordered pair of distinct sensors.
///
/// For input orientations `ori1` and `ori2` (both with respect to the
/// same frame `X`, keys `key1 < key2`) the stored value is
/// `RO(2|1) = ori2 * inverse(ori1)`, which is independent of `X`.
/// The result holds exactly `n * (n - 1) / 2` entries, iterated in
/// lexicographic `(key1, key2)` order.
pub fn relative_orientations(key_oris: &BTreeMap<SenKey, SenOri>) -> BTreeMap<KeyPair, SenOri> {
    let entries: Vec<(&SenKey, &SenOri)> = key_oris.iter().collect();
    let mut rel_oris = BTreeMap::new();

    for (ndx1, (key1, ori1)) in entries.iter().enumerate() {
        let ori_x_w1 = ori1.inverse();
        for (key2, ori2) in entries.iter().skip(ndx1 + 1) {
            let pair = KeyPair::new(key1.as_str(), key2.as_str());
            rel_oris.insert(pair, **ori2 * ori_x_w1);
        }
    }
    rel_oris
}
