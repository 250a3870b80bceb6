//! Cross search: every box convention against every independent-frame
//! convention, aggregated per sensor by maximum.

use std::collections::BTreeMap;

use log::debug;

use oriconv_core::{
    keys_match, ConNumId, ConventionAngle, ConventionOffset, ParmGroup, Real, SenKey,
};

use crate::combo::{convention_orientations_for, ros_wrt_base, ConOri};
use crate::score::basis_rmse;

/// Score of one `(box convention, independent convention)` pairing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairScore {
    pub score: Real,
    pub box_id: ConNumId,
    pub ind_id: ConNumId,
}

/// Worst-sensor basis-RMSE for every convention pairing.
///
/// Both inputs are relative-orientation tables with respect to
/// `base_key` ([`ros_wrt_base`]); the base sensor itself is skipped
/// (its entries are identities on both sides). The first remaining
/// sensor seeds each slot, later sensors aggregate by maximum, so a
/// pairing only scores well when it is consistent on *every* sensor.
/// Both maps must share one key set and contain a non-base sensor;
/// these are caller contracts and violation aborts.
pub fn cross_max_errors(
    box_con_ros: &BTreeMap<SenKey, Vec<ConOri>>,
    ind_con_ros: &BTreeMap<SenKey, Vec<ConOri>>,
    base_key: &SenKey,
) -> Vec<PairScore> {
    assert!(
        keys_match(box_con_ros, ind_con_ros),
        "cross search requires identical sensor key sets ({} vs {})",
        box_con_ros.len(),
        ind_con_ros.len()
    );

    let mut pair_scores: Vec<PairScore> = Vec::new();
    let mut seeded = false;

    for (key, box_ros) in box_con_ros {
        if key == base_key {
            continue;
        }
        let ind_ros = &ind_con_ros[key];

        if !seeded {
            pair_scores.reserve_exact(box_ros.len() * ind_ros.len());
            for &(box_id, ref box_ro) in box_ros {
                for &(ind_id, ref ind_ro) in ind_ros {
                    pair_scores.push(PairScore {
                        score: basis_rmse(box_ro, ind_ro),
                        box_id,
                        ind_id,
                    });
                }
            }
            seeded = true;
        } else {
            let mut slot = 0usize;
            for &(_, ref box_ro) in box_ros {
                for &(_, ref ind_ro) in ind_ros {
                    let rmse = basis_rmse(box_ro, ind_ro);
                    let prev = &mut pair_scores[slot].score;
                    *prev = prev.max(rmse);
                    slot += 1;
                }
            }
        }
    }

    assert!(
        seeded,
        "cross search needs at least one sensor besides base '{base_key}'"
    );
    pair_scores
}

/// Sort pairings ascending by score, NaN after every finite score,
/// ties broken lexicographically by `(box id, ind id)`.
pub fn rank_pair_scores(pair_scores: &mut [PairScore]) {
    pair_scores.sort_by(|lhs, rhs| {
        lhs.score
            .total_cmp(&rhs.score)
            .then_with(|| lhs.box_id.cmp(&rhs.box_id))
            .then_with(|| lhs.ind_id.cmp(&rhs.ind_id))
    });
}

/// Full cross search over parameter groups on both sides.
///
/// Builds the per-sensor candidate tables, re-expresses them relative
/// to the first sensor (by key order), scores every convention pairing,
/// and returns the ranked list. Both group maps must be keyed
/// identically with at least two sensors.
pub fn cross_search(
    box_groups: &BTreeMap<SenKey, ParmGroup>,
    ind_groups: &BTreeMap<SenKey, ParmGroup>,
    box_offs: &[ConventionOffset],
    box_angs: &[ConventionAngle],
    ind_offs: &[ConventionOffset],
    ind_angs: &[ConventionAngle],
) -> Vec<PairScore> {
    assert!(
        keys_match(box_groups, ind_groups),
        "cross search requires identical sensor key sets ({} vs {})",
        box_groups.len(),
        ind_groups.len()
    );
    assert!(
        box_groups.len() >= 2,
        "cross search needs at least 2 sensors, got {}",
        box_groups.len()
    );

    let base_key = box_groups
        .keys()
        .next()
        .expect("non-empty group map")
        .clone();
    debug!(
        "cross search: base '{}', {} box x {} ind conventions",
        base_key,
        2 * box_offs.len() * box_angs.len(),
        2 * ind_offs.len() * ind_angs.len()
    );

    let box_con_oris = convention_orientations_for(box_offs, box_angs, box_groups);
    let ind_con_oris = convention_orientations_for(ind_offs, ind_angs, ind_groups);

    let box_con_ros = ros_wrt_base(&box_con_oris, &base_key);
    let ind_con_ros = ros_wrt_base(&ind_con_oris, &base_key);

    let mut pair_scores = cross_max_errors(&box_con_ros, &ind_con_ros, &base_key);
    rank_pair_scores(&mut pair_scores);
    pair_scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use oriconv_core::key_from;

    fn sim_groups() -> BTreeMap<SenKey, ParmGroup> {
        let mut groups = BTreeMap::new();
        groups.insert(key_from(1), ParmGroup::new([0.0; 3], [0.0; 3]));
        groups.insert(key_from(2), ParmGroup::new([3.0, 5.0, 7.0], [0.25, 0.5, 0.75]));
        groups.insert(key_from(3), ParmGroup::new([0.1, 0.2, 0.3], [0.7, 0.6, 0.5]));
        groups
    }

    fn reduced_sets() -> (Vec<ConventionOffset>, Vec<ConventionAngle>) {
        let offs = vec![ConventionOffset::identity()];
        let angs: Vec<ConventionAngle> = ConventionAngle::all().into_iter().take(24).collect();
        (offs, angs)
    }

    #[test]
    fn identical_sides_match_on_identical_conventions() {
        let groups = sim_groups();
        let (offs, angs) = reduced_sets();

        let scores = cross_search(&groups, &groups, &offs, &angs, &offs, &angs);
        assert_eq!(scores.len(), (2 * angs.len()) * (2 * angs.len()));

        // same convention on both sides reproduces the same orientations
        for entry in &scores {
            if entry.box_id == entry.ind_id {
                assert!(entry.score < 1e-12, "{entry:?}");
            }
        }
        let best = &scores[0];
        assert!(best.score < 1e-12);
        assert_eq!(best.box_id, best.ind_id);
    }

    #[test]
    fn repeated_runs_are_bitwise_identical() {
        let groups = sim_groups();
        let (offs, angs) = reduced_sets();

        let first = cross_search(&groups, &groups, &offs, &angs, &offs, &angs);
        let second = cross_search(&groups, &groups, &offs, &angs, &offs, &angs);
        assert_eq!(first.len(), second.len());
        for (lhs, rhs) in first.iter().zip(&second) {
            assert_eq!(lhs.score.to_bits(), rhs.score.to_bits());
            assert_eq!(lhs.box_id, rhs.box_id);
            assert_eq!(lhs.ind_id, rhs.ind_id);
        }
    }

    #[test]
    fn max_aggregation_takes_worst_sensor() {
        let groups = sim_groups();
        let (offs, angs) = reduced_sets();

        let con_oris = convention_orientations_for(&offs, &angs, &groups);
        let base_key = key_from(1);
        let con_ros = ros_wrt_base(&con_oris, &base_key);
        let unsorted = cross_max_errors(&con_ros, &con_ros, &base_key);

        // per-sensor rescoring must never exceed the aggregate
        let sensors: Vec<&SenKey> = con_ros.keys().filter(|key| **key != base_key).collect();
        let ind_len = con_ros[sensors[0]].len();
        for (slot, entry) in unsorted.iter().enumerate() {
            let (box_slot, ind_slot) = (slot / ind_len, slot % ind_len);
            for sensor in &sensors {
                let ros = &con_ros[*sensor];
                let single = basis_rmse(&ros[box_slot].1, &ros[ind_slot].1);
                assert!(single <= entry.score + 1e-15);
            }
        }
    }

    #[test]
    #[should_panic(expected = "identical sensor key sets")]
    fn mismatched_keys_abort() {
        let groups = sim_groups();
        let mut fewer = groups.clone();
        fewer.remove(&key_from(3));
        let (offs, angs) = reduced_sets();
        cross_search(&groups, &fewer, &offs, &angs, &offs, &angs);
    }
}
