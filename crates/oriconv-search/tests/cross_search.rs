//! Cross-search behaviour over simulated parameter groups.

use std::collections::BTreeMap;

use oriconv_core::{ConventionAngle, ConventionOffset, ParmGroup, SenKey};
use oriconv_search::{cross_search, prominence, rank_pair_scores, PairScore};

fn simulated_groups() -> BTreeMap<SenKey, ParmGroup> {
    let entries = [
        ("SimSen1", [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
        ("SimSen2", [3.0, 5.0, 7.0], [0.25, 0.5, 0.75]),
        ("SimSen3", [0.1, 0.2, 0.3], [0.7, 0.6, 0.5]),
    ];
    entries
        .into_iter()
        .map(|(key, distances, angles)| (key.to_string(), ParmGroup::new(distances, angles)))
        .collect()
}

/// Angle subset spanning several sign/permutation/plane blocks.
fn angle_subset() -> Vec<ConventionAngle> {
    ConventionAngle::all().into_iter().step_by(11).collect()
}

#[test]
fn identical_sides_rank_self_pairings_first() {
    let groups = simulated_groups();
    // the box side must cover the ind side for self-pairings to exist
    let box_offs = vec![ConventionOffset::identity(), ConventionOffset::all()[0]];
    let ind_offs = vec![ConventionOffset::identity()];
    let angs = angle_subset();

    let scores = cross_search(&groups, &groups, &box_offs, &angs, &ind_offs, &angs);
    let box_total = 2 * box_offs.len() * angs.len();
    let ind_total = 2 * ind_offs.len() * angs.len();
    assert_eq!(scores.len(), box_total * ind_total);

    // Matching conventions reproduce identical orientations on every
    // sensor, anything else scores materially worse on at least one.
    let best = &scores[0];
    assert_eq!(best.score, 0.0, "{best:?}");
    assert_eq!(best.box_id, best.ind_id);
    for entry in scores.iter() {
        if entry.box_id == entry.ind_id {
            assert_eq!(entry.score, 0.0, "{entry:?}");
        } else {
            assert!(entry.score > 0.0, "{entry:?}");
        }
    }

    let second = scores[1].score;
    let worst = scores[scores.len() - 1].score;
    assert!(prominence(best.score, second, worst) >= 0.0);
}

#[test]
fn single_inconsistent_sensor_spoils_a_pairing() {
    let groups = simulated_groups();
    let mut skewed = groups.clone();
    // perturb one sensor only; max aggregation must veto the pairing
    skewed.insert(
        "SimSen3".to_string(),
        ParmGroup::new([0.1, 0.2, 0.3], [0.7, 0.6, 0.9]),
    );

    let ind_offs = vec![ConventionOffset::identity()];
    let angs = angle_subset();

    let clean = cross_search(&groups, &groups, &ind_offs, &angs, &ind_offs, &angs);
    let spoilt = cross_search(&groups, &skewed, &ind_offs, &angs, &ind_offs, &angs);

    assert_eq!(clean[0].score, 0.0);
    assert!(
        spoilt[0].score > 0.0,
        "one inconsistent sensor must keep every pairing above zero: {:?}",
        spoilt[0]
    );
}

#[test]
fn ranking_is_deterministic_and_tie_stable() {
    let mut scores = vec![
        PairScore {
            score: 0.5,
            box_id: 20,
            ind_id: 1,
        },
        PairScore {
            score: 0.5,
            box_id: 10,
            ind_id: 2,
        },
        PairScore {
            score: f64::NAN,
            box_id: 1,
            ind_id: 1,
        },
        PairScore {
            score: 0.25,
            box_id: 30,
            ind_id: 3,
        },
    ];
    rank_pair_scores(&mut scores);

    assert_eq!(scores[0].box_id, 30);
    assert_eq!(scores[1].box_id, 10); // tie broken by box id
    assert_eq!(scores[2].box_id, 20);
    assert!(scores[3].score.is_nan()); // NaN never outranks finite
}
