//! One-sided search: score every box convention against fixed
//! reference relative orientations.

use std::collections::BTreeMap;

use log::debug;

use oriconv_core::{
    relative_orientations, Convention, KeyPair, ParmGroup, Real, SenKey, SenOri,
};

use crate::rank::{prominence, ScoredId, TrialResult};
use crate::score::pose_difference;

/// Fit error paired with the index of the convention that produced it
/// (the index refers to the convention slice handed to the search).
pub type FitNdxPair = (Real, usize);

/// Sum of per-pair fit errors for every candidate convention.
///
/// For each reference relative orientation, the two member sensors'
/// parameter groups are transformed under the candidate convention, the
/// box-side relative orientation is formed, and its weighted difference
/// from the reference accumulates into that convention's slot. Pairs
/// whose sensors carry no parameter group are skipped.
pub fn sum_fit_errors(
    key_groups: &BTreeMap<SenKey, ParmGroup>,
    rel_key_oris: &BTreeMap<KeyPair, SenOri>,
    conventions: &[Convention],
) -> Vec<Real> {
    // Resolve keys to dense sensor slots once; every convention then
    // transforms each sensor a single time, not once per pair.
    let slot_of: BTreeMap<SenKey, usize> = key_groups
        .keys()
        .enumerate()
        .map(|(slot, key)| (key.clone(), slot))
        .collect();
    let groups: Vec<&ParmGroup> = key_groups.values().collect();
    let pair_slots: Vec<(usize, usize, &SenOri)> = rel_key_oris
        .iter()
        .filter_map(|(pair, rel_ori)| {
            let slot1 = *slot_of.get(pair.key1())?;
            let slot2 = *slot_of.get(pair.key2())?;
            Some((slot1, slot2, rel_ori))
        })
        .collect();
    debug!(
        "one-sided search: {} conventions x {} usable pairs",
        conventions.len(),
        pair_slots.len()
    );

    let mut sum_errors = vec![0.0; conventions.len()];
    let mut box_oris: Vec<SenOri> = Vec::with_capacity(groups.len());
    let mut box_invs: Vec<SenOri> = Vec::with_capacity(groups.len());
    for (slot, convention) in conventions.iter().enumerate() {
        box_oris.clear();
        box_oris.extend(groups.iter().map(|group| convention.transform_for(group)));
        box_invs.clear();
        box_invs.extend(box_oris.iter().map(SenOri::inverse));

        for &(slot1, slot2, rel_ori) in &pair_slots {
            let ro_box = box_oris[slot2] * box_invs[slot1];
            sum_errors[slot] += pose_difference(&ro_box, rel_ori);
        }
    }
    sum_errors
}

/// Ranked `(fit error, convention index)` pairs, best first.
///
/// Accumulated errors are normalised by the relative-orientation count;
/// NaN scores sort after every finite score, ties break on the index.
pub fn best_fit_conventions(
    key_groups: &BTreeMap<SenKey, ParmGroup>,
    rel_key_oris: &BTreeMap<KeyPair, SenOri>,
    conventions: &[Convention],
) -> Vec<FitNdxPair> {
    let sum_errors = sum_fit_errors(key_groups, rel_key_oris, conventions);
    let scale = 1.0 / (rel_key_oris.len() as Real);

    let mut fit_pairs: Vec<FitNdxPair> = sum_errors
        .into_iter()
        .enumerate()
        .map(|(ndx, sum)| (scale * sum, ndx))
        .collect();
    fit_pairs.sort_by(|pair_a, pair_b| {
        pair_a
            .0
            .total_cmp(&pair_b.0)
            .then_with(|| pair_a.1.cmp(&pair_b.1))
    });
    fit_pairs
}

/// Prominence of a ranked fit list (see [`prominence`]).
pub fn fit_prominence(fit_pairs: &[FitNdxPair]) -> Real {
    if fit_pairs.len() < 3 {
        return Real::NAN;
    }
    prominence(
        fit_pairs[0].0,
        fit_pairs[1].0,
        fit_pairs[fit_pairs.len() - 1].0,
    )
}

/// One-sided search against explicit reference orientations.
///
/// Builds the reference relative orientations internally and returns
/// the ranked fits. At least two common sensors are required; that is
/// a caller contract and violation aborts.
pub fn one_sided_search(
    key_groups: &BTreeMap<SenKey, ParmGroup>,
    ref_key_oris: &BTreeMap<SenKey, SenOri>,
    conventions: &[Convention],
) -> Vec<FitNdxPair> {
    assert!(
        ref_key_oris.len() >= 2,
        "one-sided search needs at least 2 reference orientations, got {}",
        ref_key_oris.len()
    );
    let rel_key_oris = relative_orientations(ref_key_oris);
    best_fit_conventions(key_groups, &rel_key_oris, conventions)
}

/// One trial per candidate independent-frame convention.
///
/// Each independent convention materialises reference orientations from
/// the independent parameter groups; a one-sided search then ranks the
/// box conventions against them. Returned trials are sorted by
/// `(best score, -prominence)`.
pub fn one_sided_trials(
    box_groups: &BTreeMap<SenKey, ParmGroup>,
    box_conventions: &[Convention],
    ind_groups: &BTreeMap<SenKey, ParmGroup>,
    ind_conventions: &[Convention],
) -> Vec<TrialResult> {
    let mut trials: Vec<TrialResult> = ind_conventions
        .iter()
        .map(|ind_convention| {
            let ind_oris: BTreeMap<SenKey, SenOri> = ind_groups
                .iter()
                .map(|(key, group)| (key.clone(), ind_convention.transform_for(group)))
                .collect();
            let fits = one_sided_search(box_groups, &ind_oris, box_conventions);

            let scored = |pair: &FitNdxPair| ScoredId {
                score: pair.0,
                con_id: box_conventions[pair.1].number(),
            };
            TrialResult {
                ind_id: ind_convention.number(),
                best: scored(&fits[0]),
                second: scored(&fits[1]),
                worst: scored(fits.last().expect("non-empty fit list")),
                prominence: fit_prominence(&fits),
            }
        })
        .collect();

    trials.sort_by(TrialResult::cmp_rank);
    trials
}
