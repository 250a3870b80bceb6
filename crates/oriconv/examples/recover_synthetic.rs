//! One-sided convention recovery with synthetic data.
//!
//! The workflow:
//! 1. Pick a parameter convention the "payload" uses internally
//! 2. Build sensor orientations from seven parameter groups under it
//! 3. Export them through an arbitrary payload-to-world transform
//! 4. Search all 55 296 conventions against the exported orientations
//! 5. Compare the winner with the convention chosen in step 1
//!
//! Run with: `cargo run -p oriconv --example recover_synthetic`

use std::collections::BTreeMap;

use anyhow::Result;
use oriconv::prelude::*;

fn main() -> Result<()> {
    println!("=== Convention Recovery (Synthetic) ===\n");

    // Parameter groups as the payload exports them (order/sign unknown)
    let key_groups: BTreeMap<SenKey, ParmGroup> = [
        ("pg0", [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
        ("pg1", [-60.1, 10.3, 21.1], [0.617, -0.113, -0.229]),
        ("pg2", [10.7, -60.7, 31.1], [-0.127, 0.619, -0.317]),
        ("pg3", [30.7, 22.7, -61.3], [-0.331, -0.631, 0.239]),
        ("pg4", [10.1, -40.9, -50.3], [-0.109, 0.421, 0.523]),
        ("pg5", [-41.9, 22.3, -52.1], [0.431, -0.233, 0.541]),
        ("pg6", [-40.1, -50.9, 31.3], [0.433, 0.547, -0.337]),
    ]
    .into_iter()
    .map(|(key, distances, angles)| (key.to_string(), ParmGroup::new(distances, angles)))
    .collect();

    // The convention to be treated as unknown by the search
    let hidden = ConventionString::parse("++- 102 +-+ 012 121 1").to_convention();
    println!("Hidden convention: {hidden}\n");

    // Arbitrary (and equally unknown) payload-to-world orientation
    let payload_wrt_world = Transform {
        loc: Vec3::new(1000.0, 2000.0, 3000.0),
        att: Spinor::from_phys_angle(BiVec3::new(-0.7, 1.5, 3.0)),
    };

    // "Independently surveyed" world-frame orientations
    let world_oris: BTreeMap<SenKey, SenOri> = key_groups
        .iter()
        .map(|(key, group)| {
            (
                key.clone(),
                hidden.transform_for(group) * payload_wrt_world,
            )
        })
        .collect();
    println!("Simulated {} world-frame orientations", world_oris.len());

    // Search the full convention space
    let conventions = Convention::all();
    println!("Searching {} conventions...\n", conventions.len());
    let fits = one_sided_search(&key_groups, &world_oris, &conventions);

    println!("--- Ranked results (top 5) ---");
    for (score, ndx) in fits.iter().take(5) {
        println!("  {score:12.9}  {}", conventions[*ndx]);
    }

    let best = conventions[fits[0].1];
    let prominence = fit_prominence(&fits);
    println!();
    println!("Best convention:  {}", best.number());
    println!("Hidden convention: {}", hidden.number());
    println!("Best score: {:.3e}", fits[0].0);
    println!("Prominence: {prominence:.4}");
    println!(
        "Recovered: {}",
        if best == hidden { "yes" } else { "NO" }
    );

    Ok(())
}
