//! Line-oriented ASCII loaders for parameter-group and independent
//! exterior-orientation files.
//!
//! Both formats are keyword records, one per line, with `#` starting a
//! comment that runs to end of line:
//!
//! ```text
//! Distances:  <key> <d1> <d2> <d3>      # meters
//! Angles:     <key> <a1> <a2> <a3>      # radians
//! Convention: <key> <offSgn> <offNdx> <angSgn> <angNdx> <bivNdx> <order>
//! ```
//!
//! Malformed or non-finite records are dropped silently (logged at
//! debug level); a sensor is emitted only when all of its required
//! records survived.

use std::collections::BTreeMap;
use std::io::BufRead;

use log::debug;

use oriconv_core::{
    Convention, ConventionString, ParmGroup, Real, SenKey, SenOri, ThreeAngles, ThreeDistances,
};

/// Leading portion of a line before any `#` comment.
pub fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(end) => &line[..end],
        None => line,
    }
}

/// Three finite floats from the remaining tokens, or `None`.
fn three_values<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Option<[Real; 3]> {
    let mut values = [0.0; 3];
    for slot in &mut values {
        *slot = tokens.next()?.parse::<Real>().ok()?;
        if !slot.is_finite() {
            return None;
        }
    }
    Some(values)
}

/// Parameter groups keyed by sensor.
///
/// Only sensors with both a `Distances:` and an `Angles:` record (all
/// six components finite) are emitted.
pub fn load_parm_groups<R: BufRead>(reader: R) -> std::io::Result<BTreeMap<SenKey, ParmGroup>> {
    let mut key_distances: BTreeMap<SenKey, ThreeDistances> = BTreeMap::new();
    let mut key_angles: BTreeMap<SenKey, ThreeAngles> = BTreeMap::new();

    for line in reader.lines() {
        let line = line?;
        let record = strip_comment(&line).trim();
        if record.is_empty() {
            continue;
        }
        let mut tokens = record.split_whitespace();
        let keyword = tokens.next().unwrap_or_default();
        let Some(sen_key) = tokens.next() else {
            continue;
        };
        match keyword {
            "Distances:" => match three_values(tokens) {
                Some(values) => {
                    key_distances.insert(sen_key.to_string(), values);
                }
                None => debug!("dropping bad distance record: {record}"),
            },
            "Angles:" => match three_values(tokens) {
                Some(values) => {
                    key_angles.insert(sen_key.to_string(), values);
                }
                None => debug!("dropping bad angle record: {record}"),
            },
            _ => {}
        }
    }

    let mut parm_groups = BTreeMap::new();
    for (sen_key, distances) in key_distances {
        if let Some(angles) = key_angles.get(&sen_key) {
            let group = ParmGroup::new(distances, *angles);
            if group.is_valid() {
                parm_groups.insert(sen_key, group);
            }
        }
    }
    Ok(parm_groups)
}

/// Independent exterior orientations plus the conventions that
/// interpreted them.
#[derive(Debug, Clone)]
pub struct IndependentEos {
    /// Materialised orientation per sensor.
    pub orientations: BTreeMap<SenKey, SenOri>,
    /// The file-declared interpretation per sensor.
    pub conventions: BTreeMap<SenKey, Convention>,
}

impl IndependentEos {
    /// The convention id shared by every sensor, or `-1` when the file
    /// mixes interpretations.
    pub fn uniform_convention_id(&self) -> i64 {
        let mut ids = self.conventions.values().map(Convention::number);
        match ids.next() {
            Some(first) if ids.all(|id| id == first) => first,
            _ => -1,
        }
    }
}

/// Exterior orientations from an independent-EO file.
///
/// Each sensor needs `Convention:`, `Distances:`, and `Angles:`
/// records; incomplete sensors are dropped silently. The orientation is
/// the sensor's parameter group materialised under the declared
/// convention.
pub fn load_independent_eos<R: BufRead>(reader: R) -> std::io::Result<IndependentEos> {
    let mut key_conventions: BTreeMap<SenKey, Convention> = BTreeMap::new();
    let mut key_distances: BTreeMap<SenKey, ThreeDistances> = BTreeMap::new();
    let mut key_angles: BTreeMap<SenKey, ThreeAngles> = BTreeMap::new();

    for line in reader.lines() {
        let line = line?;
        let record = strip_comment(&line).trim();
        if record.is_empty() {
            continue;
        }
        let mut tokens = record.split_whitespace();
        let keyword = tokens.next().unwrap_or_default();
        let Some(sen_key) = tokens.next() else {
            continue;
        };
        match keyword {
            "Convention:" => {
                let encoding = tokens.collect::<Vec<_>>().join(" ");
                let con_string = ConventionString::parse(&encoding);
                if con_string.is_valid() {
                    key_conventions.insert(sen_key.to_string(), con_string.to_convention());
                } else {
                    debug!("dropping bad convention record: {record}");
                }
            }
            "Distances:" => match three_values(tokens) {
                Some(values) => {
                    key_distances.insert(sen_key.to_string(), values);
                }
                None => debug!("dropping bad distance record: {record}"),
            },
            "Angles:" => match three_values(tokens) {
                Some(values) => {
                    key_angles.insert(sen_key.to_string(), values);
                }
                None => debug!("dropping bad angle record: {record}"),
            },
            _ => {}
        }
    }

    let mut orientations = BTreeMap::new();
    let mut conventions = BTreeMap::new();
    for (sen_key, convention) in key_conventions {
        let (Some(distances), Some(angles)) =
            (key_distances.get(&sen_key), key_angles.get(&sen_key))
        else {
            debug!("sensor '{sen_key}' missing records, dropped");
            continue;
        };
        let group = ParmGroup::new(*distances, *angles);
        if !group.is_valid() {
            continue;
        }
        orientations.insert(sen_key.clone(), convention.transform_for(&group));
        conventions.insert(sen_key, convention);
    }
    Ok(IndependentEos {
        orientations,
        conventions,
    })
}
