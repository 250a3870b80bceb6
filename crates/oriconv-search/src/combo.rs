//! Per-sensor tables of candidate orientations, one entry per
//! convention, aligned on a common iteration order across sensors.

use std::collections::BTreeMap;

use log::debug;

use oriconv_core::{
    ConNumId, Convention, ConventionAngle, ConventionOffset, Order, ParmGroup, SenKey, SenOri,
    Transform,
};

/// Convention id paired with the orientation it produces.
pub type ConOri = (ConNumId, SenOri);

/// Candidate orientations for one parameter group under every
/// combination of the given offset and angle conventions and both
/// composition orders.
///
/// The attitude is computed once per angle convention and shared by
/// all offsets; iteration runs angle conventions outer, offsets inner,
/// `TranRot` before `RotTran`. Every call with the same convention
/// slices yields the same slot-to-convention alignment, which the
/// cross search relies on.
pub fn convention_orientation_pairs(
    con_offs: &[ConventionOffset],
    con_angs: &[ConventionAngle],
    parm_group: &ParmGroup,
) -> Vec<ConOri> {
    let mut con_oris = Vec::with_capacity(2 * con_offs.len() * con_angs.len());

    for con_ang in con_angs {
        let att = con_ang.attitude_for(parm_group);
        let att_inv = att.reverse();

        for con_off in con_offs {
            let trans = con_off.offset_for(parm_group);

            let conv_tr = Convention {
                offset: *con_off,
                angle: *con_ang,
                order: Order::TranRot,
            };
            con_oris.push((conv_tr.number(), Transform { loc: trans, att }));

            // range-frame offset converted into the domain frame
            let conv_rt = Convention {
                offset: *con_off,
                angle: *con_ang,
                order: Order::RotTran,
            };
            con_oris.push((
                conv_rt.number(),
                Transform {
                    loc: att_inv.rotate(&trans),
                    att,
                },
            ));
        }
    }
    con_oris
}

/// [`convention_orientation_pairs`] for every sensor of a keyed set.
pub fn convention_orientations_for(
    con_offs: &[ConventionOffset],
    con_angs: &[ConventionAngle],
    parm_groups: &BTreeMap<SenKey, ParmGroup>,
) -> BTreeMap<SenKey, Vec<ConOri>> {
    parm_groups
        .iter()
        .map(|(key, parm_group)| {
            (
                key.clone(),
                convention_orientation_pairs(con_offs, con_angs, parm_group),
            )
        })
        .collect()
}

/// Re-express every per-convention orientation relative to one base
/// sensor.
///
/// Slot `n` of the result for sensor `k` holds
/// `ori_k[n] * inverse(ori_base[n])` under the same convention id; the
/// base sensor itself maps to identity at every slot (callers usually
/// skip it). The base key must be present and all per-sensor tables
/// must have equal length; both are construction contracts, violation
/// aborts.
pub fn ros_wrt_base(
    con_oris: &BTreeMap<SenKey, Vec<ConOri>>,
    base_key: &SenKey,
) -> BTreeMap<SenKey, Vec<ConOri>> {
    let base_oris = con_oris
        .get(base_key)
        .unwrap_or_else(|| panic!("base sensor '{base_key}' missing from orientation tables"));
    debug!(
        "relative orientations wrt '{}': {} sensors x {} conventions",
        base_key,
        con_oris.len(),
        base_oris.len()
    );

    con_oris
        .iter()
        .map(|(key, free_oris)| {
            assert_eq!(
                free_oris.len(),
                base_oris.len(),
                "orientation table size mismatch for sensor '{key}'"
            );
            let rel: Vec<ConOri> = base_oris
                .iter()
                .zip(free_oris)
                .map(|(&(con_id, ref base_ori), &(_, free_ori))| {
                    (con_id, free_ori * base_ori.inverse())
                })
                .collect();
            (key.clone(), rel)
        })
        .collect()
}
