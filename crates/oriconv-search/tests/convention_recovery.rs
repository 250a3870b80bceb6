//! End-to-end recovery of a known convention from simulated payload
//! data.
//!
//! Seven sensors with diverse parameter groups are orientated inside a
//! fictitious payload under one fixed (to the test, "unknown")
//! convention; an arbitrary payload-to-world transform then produces
//! the independently surveyed orientations. The one-sided search over
//! the full 55 296-member convention space must single out the fixed
//! convention decisively.

use std::collections::BTreeMap;

use oriconv_core::{
    BiVec3, Convention, ConventionString, ParmGroup, SenKey, SenOri, Spinor, Transform, Vec3,
};
use oriconv_search::{fit_prominence, one_sided_search};

/// A diverse selection of angle and distance parameters.
fn simulated_parm_groups() -> BTreeMap<SenKey, ParmGroup> {
    let entries = [
        ("pg0", [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
        ("pg1", [-60.1, 10.3, 21.1], [0.617, -0.113, -0.229]),
        ("pg2", [10.7, -60.7, 31.1], [-0.127, 0.619, -0.317]),
        ("pg3", [30.7, 22.7, -61.3], [-0.331, -0.631, 0.239]),
        ("pg4", [10.1, -40.9, -50.3], [-0.109, 0.421, 0.523]),
        ("pg5", [-41.9, 22.3, -52.1], [0.431, -0.233, 0.541]),
        ("pg6", [-40.1, -50.9, 31.3], [0.433, 0.547, -0.337]),
    ];
    entries
        .into_iter()
        .map(|(key, distances, angles)| (key.to_string(), ParmGroup::new(distances, angles)))
        .collect()
}

/// The convention the simulated payload uses internally.
fn payload_convention() -> Convention {
    let convention = ConventionString::parse("++- 102 +-+ 012 121 1").to_convention();
    assert!(convention.is_valid());
    convention
}

/// Arbitrary orientation of the payload frame in the survey frame.
fn payload_wrt_world() -> Transform {
    Transform {
        loc: Vec3::new(1000.0, 2000.0, 3000.0),
        att: Spinor::from_phys_angle(BiVec3::new(-0.7, 1.5, 3.0)),
    }
}

#[test]
fn recovers_the_payload_convention() {
    let key_groups = simulated_parm_groups();
    let convention = payload_convention();

    // Sensor orientations inside the payload frame, then exported into
    // the world frame by the (unknown to the search) outer transform.
    let outer = payload_wrt_world();
    let world_oris: BTreeMap<SenKey, SenOri> = key_groups
        .iter()
        .map(|(key, group)| (key.clone(), convention.transform_for(group) * outer))
        .collect();

    let all_conventions = Convention::all();
    let fits = one_sided_search(&key_groups, &world_oris, &all_conventions);
    assert_eq!(fits.len(), all_conventions.len());

    let best = all_conventions[fits[0].1];
    assert_eq!(
        best.number(),
        convention.number(),
        "best: {best}, fits[0..4]: {:?}",
        &fits[..4]
    );
    assert!(fits[0].0 < 1e-10, "best score {}", fits[0].0);

    let prom = fit_prominence(&fits);
    assert!(prom > 0.05, "prominence {prom}");
}

#[test]
fn scores_are_ordered_and_finite_leading() {
    let key_groups = simulated_parm_groups();
    let convention = payload_convention();
    let world_oris: BTreeMap<SenKey, SenOri> = key_groups
        .iter()
        .map(|(key, group)| {
            (
                key.clone(),
                convention.transform_for(group) * payload_wrt_world(),
            )
        })
        .collect();

    // a modest slice of the space keeps this check cheap
    let some_conventions: Vec<Convention> = Convention::enumerate_all().step_by(97).collect();
    let fits = one_sided_search(&key_groups, &world_oris, &some_conventions);

    assert!(fits[0].0.is_finite());
    for window in fits.windows(2) {
        assert!(
            window[0].0.total_cmp(&window[1].0).is_le(),
            "{window:?}"
        );
    }
}
