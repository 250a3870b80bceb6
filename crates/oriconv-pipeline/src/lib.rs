//! End-to-end runs: load input files, search, and write the report.
//!
//! Two run shapes mirror the two search strategies:
//! [`run_one_sided`] reconciles box parameter groups against an
//! independent exterior-orientation file; [`run_cross`] searches the
//! convention cross product over two parameter-group files.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use oriconv_core::{
    common_keys, ConNumId, Convention, ConventionAngle, ConventionOffset, ParmGroup, Real, SenKey,
};
use oriconv_search::{cross_search, fit_prominence, one_sided_search, FitNdxPair, PairScore};

/// Line-oriented file loaders.
pub mod io;
/// ASCII report writer.
pub mod report;

pub use io::{load_independent_eos, load_parm_groups, strip_comment, IndependentEos};
pub use report::{write_header, write_rows, ReportRow};

/// Errors surfaced by the run functions (input-shape category).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("need at least 2 usable sensors common to both inputs, got {count}")]
    TooFewSensors { count: usize },
}

impl PipelineError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Options for the one-sided (box conventions only) run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneSidedConfig {
    /// Ranked rows written to the report.
    pub max_rows: usize,
}

impl Default for OneSidedConfig {
    fn default() -> Self {
        Self { max_rows: 1000 }
    }
}

/// Options for the cross (box by independent conventions) run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossConfig {
    /// Search all 48 independent offset conventions instead of only
    /// the identity-like one. The full cross product needs tens of GiB
    /// of result storage; the restricted default stays around 1.5 GiB.
    pub full_ind_offsets: bool,
    /// Ranked rows written to the report.
    pub max_rows: usize,
}

impl Default for CrossConfig {
    fn default() -> Self {
        Self {
            full_ind_offsets: false,
            max_rows: 1000,
        }
    }
}

fn open_reader(path: &Path) -> Result<BufReader<File>, PipelineError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| PipelineError::io(path, source))
}

/// Outcome of a one-sided run.
#[derive(Debug, Clone)]
pub struct OneSidedRun {
    /// Ranked `(score, convention index)` fits, best first.
    pub fits: Vec<FitNdxPair>,
    /// The convention enumeration the fit indices refer to.
    pub conventions: Vec<Convention>,
    /// Convention id declared by the EO file (`-1` when mixed).
    pub ind_id: ConNumId,
    pub prominence: Real,
    pub box_count: usize,
    pub eo_count: usize,
    pub elapsed: Duration,
}

/// Load a box parameter-group file and an independent-EO file, then
/// rank every box convention against the EO relative orientations.
pub fn run_one_sided(box_path: &Path, eo_path: &Path) -> Result<OneSidedRun, PipelineError> {
    let box_groups = load_parm_groups(open_reader(box_path)?)
        .map_err(|source| PipelineError::io(box_path, source))?;
    let ind_eos = load_independent_eos(open_reader(eo_path)?)
        .map_err(|source| PipelineError::io(eo_path, source))?;

    let usable = common_keys(&box_groups, &ind_eos.orientations);
    if usable.len() < 2 {
        return Err(PipelineError::TooFewSensors {
            count: usable.len(),
        });
    }
    info!(
        "one-sided run: {} box sensors, {} EO sensors, {} common",
        box_groups.len(),
        ind_eos.orientations.len(),
        usable.len()
    );

    let started = Instant::now();
    let conventions = Convention::all();
    let fits = one_sided_search(&box_groups, &ind_eos.orientations, &conventions);
    let prominence = fit_prominence(&fits);
    let elapsed = started.elapsed();
    debug!("one-sided search finished in {elapsed:?}");

    Ok(OneSidedRun {
        fits,
        conventions,
        ind_id: ind_eos.uniform_convention_id(),
        prominence,
        box_count: box_groups.len(),
        eo_count: ind_eos.orientations.len(),
        elapsed,
    })
}

/// Write the report for a one-sided run.
pub fn write_one_sided_report<W: Write>(
    writer: &mut W,
    run: &OneSidedRun,
    config: &OneSidedConfig,
) -> std::io::Result<()> {
    let best = run.fits[0];
    let worst = run.fits[run.fits.len() - 1];
    let header = [
        format!("boxKeyPGs count: {}", run.box_count),
        format!("indKeyEOs count: {}", run.eo_count),
        format!("conventions searched: {}", run.conventions.len()),
        format!("search time: {:.3} s", run.elapsed.as_secs_f64()),
        format!("best:  {:.9} {}", best.0, run.conventions[best.1].number()),
        format!("worst: {:.9} {}", worst.0, run.conventions[worst.1].number()),
        format!("prominence: {:.6}", run.prominence),
    ];
    write_header(writer, &header)?;

    let rows: Vec<ReportRow> = run
        .fits
        .iter()
        .take(config.max_rows)
        .map(|&(score, ndx)| ReportRow {
            score,
            box_id: run.conventions[ndx].number(),
            ind_id: run.ind_id,
        })
        .collect();
    write_rows(writer, &rows, run.fits.len())
}

/// Outcome of a cross run.
#[derive(Debug, Clone)]
pub struct CrossRun {
    /// Ranked convention pairings, best first.
    pub scores: Vec<PairScore>,
    pub box_convention_count: usize,
    pub ind_convention_count: usize,
    pub sensor_count: usize,
    pub elapsed: Duration,
}

/// Load box and independent parameter-group files and run the full
/// cross search.
pub fn run_cross(
    box_path: &Path,
    ind_path: &Path,
    config: &CrossConfig,
) -> Result<CrossRun, PipelineError> {
    let box_groups = load_parm_groups(open_reader(box_path)?)
        .map_err(|source| PipelineError::io(box_path, source))?;
    let ind_groups = load_parm_groups(open_reader(ind_path)?)
        .map_err(|source| PipelineError::io(ind_path, source))?;

    // The search demands identical key sets; restrict both maps to the
    // sensors present in both files first.
    let usable = common_keys(&box_groups, &ind_groups);
    if usable.len() < 2 {
        return Err(PipelineError::TooFewSensors {
            count: usable.len(),
        });
    }
    let restrict = |groups: &BTreeMap<SenKey, ParmGroup>| -> BTreeMap<SenKey, ParmGroup> {
        groups
            .iter()
            .filter(|(key, _)| usable.contains(*key))
            .map(|(key, group)| (key.clone(), *group))
            .collect()
    };
    let box_groups = restrict(&box_groups);
    let ind_groups = restrict(&ind_groups);

    let box_offs = ConventionOffset::all();
    let box_angs = ConventionAngle::all();
    let ind_offs = if config.full_ind_offsets {
        ConventionOffset::all()
    } else {
        vec![ConventionOffset::identity()]
    };
    let ind_angs = ConventionAngle::all();
    info!(
        "cross run: {} sensors, {} x {} conventions",
        usable.len(),
        2 * box_offs.len() * box_angs.len(),
        2 * ind_offs.len() * ind_angs.len()
    );

    let started = Instant::now();
    let scores = cross_search(
        &box_groups,
        &ind_groups,
        &box_offs,
        &box_angs,
        &ind_offs,
        &ind_angs,
    );
    let elapsed = started.elapsed();
    debug!("cross search finished in {elapsed:?}");

    Ok(CrossRun {
        scores,
        box_convention_count: 2 * box_offs.len() * box_angs.len(),
        ind_convention_count: 2 * ind_offs.len() * ind_angs.len(),
        sensor_count: usable.len(),
        elapsed,
    })
}

/// Write the report for a cross run.
pub fn write_cross_report<W: Write>(
    writer: &mut W,
    run: &CrossRun,
    config: &CrossConfig,
) -> std::io::Result<()> {
    let best = run.scores[0];
    let worst = run.scores[run.scores.len() - 1];
    let header = [
        format!("sensors compared: {}", run.sensor_count),
        format!("box conventions: {}", run.box_convention_count),
        format!("ind conventions: {}", run.ind_convention_count),
        format!("pairings scored: {}", run.scores.len()),
        format!("search time: {:.3} s", run.elapsed.as_secs_f64()),
        format!("best:  {:.9} {} {}", best.score, best.box_id, best.ind_id),
        format!("worst: {:.9} {} {}", worst.score, worst.box_id, worst.ind_id),
    ];
    write_header(writer, &header)?;

    let rows: Vec<ReportRow> = run
        .scores
        .iter()
        .take(config.max_rows)
        .map(|entry| ReportRow {
            score: entry.score,
            box_id: entry.box_id,
            ind_id: entry.ind_id,
        })
        .collect();
    write_rows(writer, &rows, run.scores.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_json_round_trip() {
        let config = CrossConfig {
            full_ind_offsets: true,
            max_rows: 40,
        };
        let json = serde_json::to_string_pretty(&config).unwrap();
        assert!(json.contains("full_ind_offsets"));
        let back: CrossConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.full_ind_offsets, config.full_ind_offsets);
        assert_eq!(back.max_rows, config.max_rows);
    }

    #[test]
    fn defaults_restrict_the_ind_side() {
        let config = CrossConfig::default();
        assert!(!config.full_ind_offsets);
        assert_eq!(config.max_rows, 1000);
        assert_eq!(OneSidedConfig::default().max_rows, 1000);
    }
}
