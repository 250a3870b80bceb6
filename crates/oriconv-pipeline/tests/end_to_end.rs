//! File-to-report runs over simulated sensor data.

use std::collections::BTreeMap;
use std::io::Write as _;
use std::path::Path;

use tempfile::NamedTempFile;

use oriconv_core::{
    opk_from, BiVec3, Convention, ConventionString, ParmGroup, SenKey, Spinor, Transform, Vec3,
};
use oriconv_pipeline::{
    run_cross, run_one_sided, write_one_sided_report, CrossConfig, OneSidedConfig, PipelineError,
};

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

fn payload_convention() -> Convention {
    ConventionString::parse("++- 102 +-+ 012 121 1").to_convention()
}

fn write_parm_group_file(groups: &BTreeMap<SenKey, ParmGroup>) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "# payload-exported parameter groups").unwrap();
    for (key, group) in groups {
        writeln!(
            file,
            "Distances: {key} {} {} {}",
            group.distances[0], group.distances[1], group.distances[2]
        )
        .unwrap();
        writeln!(
            file,
            "Angles: {key} {} {} {}",
            group.angles[0], group.angles[1], group.angles[2]
        )
        .unwrap();
    }
    file.flush().unwrap();
    file
}

/// Survey-frame orientations written as an EO file under the plain
/// identity convention (locations verbatim, angles as omega-phi-kappa).
fn write_eo_file(world_oris: &BTreeMap<SenKey, Transform>) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for (key, ori) in world_oris {
        let opk = opk_from(&ori.att);
        assert!(opk.iter().all(|angle| angle.is_finite()), "gimbal lock");
        writeln!(file, "Convention: {key} +++ 012 +++ 012 012 0").unwrap();
        writeln!(
            file,
            "Distances: {key} {} {} {}",
            ori.loc.x, ori.loc.y, ori.loc.z
        )
        .unwrap();
        writeln!(file, "Angles: {key} {} {} {}", opk[0], opk[1], opk[2]).unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn one_sided_run_recovers_convention_from_files() {
    let groups = simulated_parm_groups();
    let convention = payload_convention();
    let outer = Transform {
        loc: Vec3::new(1000.0, 2000.0, 3000.0),
        att: Spinor::from_phys_angle(BiVec3::new(-0.7, 1.5, 3.0)),
    };
    let world_oris: BTreeMap<SenKey, Transform> = groups
        .iter()
        .map(|(key, group)| (key.clone(), convention.transform_for(group) * outer))
        .collect();

    let box_file = write_parm_group_file(&groups);
    let eo_file = write_eo_file(&world_oris);

    let run = run_one_sided(box_file.path(), eo_file.path()).unwrap();
    assert_eq!(run.box_count, 7);
    assert_eq!(run.eo_count, 7);

    let best = run.conventions[run.fits[0].1];
    assert_eq!(best.number(), convention.number());
    assert!(run.fits[0].0 < 1e-10, "best score {}", run.fits[0].0);
    assert!(run.prominence > 0.05, "prominence {}", run.prominence);
    assert_eq!(run.ind_id, 1_070_507_050_500);

    let mut report = Vec::new();
    let config = OneSidedConfig { max_rows: 10 };
    write_one_sided_report(&mut report, &run, &config).unwrap();
    let text = String::from_utf8(report).unwrap();
    assert!(text.contains("# boxKeyPGs count: 7"));
    assert!(text.contains("showing 10 of 55296"));
    // the winning row leads the listing
    let first_row = text
        .lines()
        .find(|line| !line.starts_with('#'))
        .unwrap();
    assert!(first_row.contains(&best.number().to_string()), "{first_row}");
    assert!(first_row.contains("'++- 102 +-+ 012 121 1'"), "{first_row}");
}

#[test]
fn too_few_common_sensors_is_reported() {
    let groups = simulated_parm_groups();
    let box_file = write_parm_group_file(&groups);

    // EO file naming only one matching sensor
    let mut eo_file = NamedTempFile::new().unwrap();
    writeln!(eo_file, "Convention: pg1 +++ 012 +++ 012 012 0").unwrap();
    writeln!(eo_file, "Distances: pg1 1. 2. 3.").unwrap();
    writeln!(eo_file, "Angles: pg1 .1 .2 .3").unwrap();
    eo_file.flush().unwrap();

    let err = run_one_sided(box_file.path(), eo_file.path()).unwrap_err();
    match err {
        PipelineError::TooFewSensors { count } => assert_eq!(count, 1),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_input_file_is_an_io_error() {
    let groups = simulated_parm_groups();
    let box_file = write_parm_group_file(&groups);
    let err = run_one_sided(box_file.path(), Path::new("/nonexistent/eos.txt")).unwrap_err();
    assert!(matches!(err, PipelineError::Io { .. }), "{err}");

    let err = run_cross(
        Path::new("/nonexistent/box.txt"),
        box_file.path(),
        &CrossConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, PipelineError::Io { .. }), "{err}");
}
